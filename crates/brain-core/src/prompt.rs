//! Prompt helpers for hashing and loading prompt files.

use std::path::Path;

use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Load a prompt file, returning None if not found or empty.
pub fn load_prompt_file(path: impl AsRef<Path>) -> Option<String> {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_load_prompt_file_missing() {
        assert!(load_prompt_file("/nonexistent/prompt-file.md").is_none());
    }

    #[test]
    fn test_load_prompt_file_trims() {
        let path = std::env::temp_dir().join(format!("brain-core-prompt-{}.md", std::process::id()));
        std::fs::write(&path, "\n  You are Aura.  \n").unwrap();
        assert_eq!(load_prompt_file(&path).as_deref(), Some("You are Aura."));

        std::fs::write(&path, "   \n").unwrap();
        assert!(load_prompt_file(&path).is_none());

        std::fs::remove_file(&path).unwrap();
    }
}
