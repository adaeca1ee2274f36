use std::error::Error;
use std::fs;
use std::path::Path;

use crate::level::Level;
use crate::parser;
use crate::LoadLevel;

pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    Ok(fs::read_to_string(path)?)
}

impl<P: AsRef<Path>> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let text = read_file(self)?;
        let level = parser::parse(&text)?;
        Ok(level)
    }
}
