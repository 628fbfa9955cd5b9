use crate::common::*;

#[doc = r#"
    Reads a TOML file and deserialises it into `T`.

    # Arguments
    * `file_path` - path of the TOML file

    # Returns
    * `Result<T, anyhow::Error>`

    # Errors
    - the file does not exist or cannot be read
    - the TOML is malformed or does not match `T`
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content: String = std::fs::read_to_string(file_path)
        .map_err(|e| anyhow!("[read_toml_from_file()] cannot read '{}': {}", file_path, e))?;
    let toml: T = toml::from_str(&toml_content)?;

    Ok(toml)
}

#[doc = "Creates the parent directory of `path` when it does not exist yet"]
pub async fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            anyhow!(
                "[ensure_parent_dir()] cannot create directory {:?}: {}",
                parent,
                e
            )
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
        size: u32,
    }

    #[test]
    fn reads_toml_into_struct() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("sample.toml");
        std::fs::write(&path, "name = \"a\"\nsize = 3\n").unwrap();

        let sample: Sample = read_toml_from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(sample.name, "a");
        assert_eq!(sample.size, 3);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("broken.toml");
        std::fs::write(&path, "name = ").unwrap();

        assert!(read_toml_from_file::<Sample>(path.to_str().unwrap()).is_err());
    }

    #[tokio::test]
    async fn creates_missing_parent_dirs() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("nested/charts/out.png");

        ensure_parent_dir(&path).await.unwrap();
        assert!(dir.path().join("nested/charts").is_dir());

        ensure_parent_dir(Path::new("bare.png")).await.unwrap();
    }
}
