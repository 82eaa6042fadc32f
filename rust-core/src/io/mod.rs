// IO module: reading indexed reflections and reference cells from text files

// ======================== MODULE DECLARATIONS ========================
pub mod reflection_file;


// ======================== REFLECTION FILES ========================
pub use reflection_file::{
    CrystalInfo,                    // struct - reference lattice from the header plus space-group label
    ReflectionFile,                 // struct - optional CrystalInfo plus parsed reflections
    load_reflection_file,           // fn(impl BufRead) -> Result<ReflectionFile>
    load_reflection_path,           // fn(impl AsRef<Path>) -> Result<ReflectionFile>
    parse_reflection_line,          // fn(&str) -> Result<Reflection> - one "h k l m d" row
    parse_reflection_text,          // fn(&str) -> Result<ReflectionFile>
    read_crystal_info,              // fn(&[impl AsRef<str>]) -> Option<CrystalInfo>
    read_reflections,               // fn(&[impl AsRef<str>]) -> Result<Vec<Reflection>> - skips malformed rows
    split_sections,                 // fn(lines) -> (header, body)
};
