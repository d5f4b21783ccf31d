// Thu Feb 5 2026 - Alex

use crate::emit::PackageOutput;
use crate::error::GeneratorError;
use std::fs;
use std::path::{Path, PathBuf};

/// Validated destination for generated headers. Constructing one is the
/// first thing a run does; a missing target aborts before any graph work.
pub struct OutputTarget {
    root: PathBuf,
}

impl OutputTarget {
    pub fn new(output_dir: Option<&Path>) -> Result<Self, GeneratorError> {
        match output_dir {
            Some(dir) => Ok(Self { root: dir.to_path_buf() }),
            None => Err(GeneratorError::MissingOutputTarget),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn prepare(&self) -> Result<(), GeneratorError> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    /// Writes the four per-package headers. Empty sections are skipped so a
    /// package without functions does not produce empty files. Returns the
    /// paths written, in a fixed order.
    pub fn write_package(&self, output: &PackageOutput) -> Result<Vec<PathBuf>, GeneratorError> {
        let sections: [(&str, &str); 4] = [
            ("structs", &output.structs),
            ("classes", &output.classes),
            ("parameters", &output.parameters),
            ("functions", &output.functions),
        ];

        let mut written = Vec::new();
        for (suffix, text) in sections {
            if text.is_empty() {
                continue;
            }
            let path = self.root.join(format!("{}_{}.h", output.name, suffix));
            fs::write(&path, text)?;
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ObjectId;

    #[test]
    fn test_missing_target_is_fatal() {
        let err = OutputTarget::new(None).err().unwrap();
        assert!(matches!(err, GeneratorError::MissingOutputTarget));
    }

    #[test]
    fn test_write_package_skips_empty_sections() {
        let dir = std::env::temp_dir().join("sdkgen_output_test");
        let _ = fs::remove_dir_all(&dir);
        let target = OutputTarget::new(Some(&dir)).unwrap();
        target.prepare().unwrap();

        let output = PackageOutput {
            package: ObjectId(0),
            name: "Engine".to_string(),
            structs: "// Struct Engine.Vector\n".to_string(),
            classes: "// Class Engine.Actor\n".to_string(),
            parameters: String::new(),
            functions: String::new(),
        };
        let written = target.write_package(&output).unwrap();

        assert_eq!(written.len(), 2);
        assert!(dir.join("Engine_structs.h").exists());
        assert!(dir.join("Engine_classes.h").exists());
        assert!(!dir.join("Engine_parameters.h").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
