//! `petrona theme`: write `tailwind.config.mjs` from `[theme]`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::ThemeArgs;
use crate::config::SiteConfig;
use crate::log;
use crate::theme::{TAILWIND_CONFIG, render_tailwind_config, write_tailwind_config};

pub fn run_theme(args: &ThemeArgs, config: &SiteConfig) -> Result<()> {
    match target(args.output.as_deref(), config) {
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(render_tailwind_config(&config.theme).as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => {
            write_tailwind_config(&config.theme, &path)?;
            log!("theme"; "wrote {}", config.root_relative(&path).display());
        }
    }
    Ok(())
}

/// Destination file, `None` for stdout.
fn target(output: Option<&Path>, config: &SiteConfig) -> Option<PathBuf> {
    match output {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path.to_path_buf()),
        None => Some(config.root_join(TAILWIND_CONFIG)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommonArgs;
    use crate::logger::capture::capture;
    use std::fs;

    fn config(root: &Path) -> SiteConfig {
        SiteConfig {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_target() {
        let config = config(Path::new("/site"));
        assert_eq!(target(Some(Path::new("-")), &config), None);
        assert_eq!(
            target(Some(Path::new("out.mjs")), &config),
            Some(PathBuf::from("out.mjs"))
        );
        assert_eq!(
            target(None, &config),
            Some(PathBuf::from("/site/tailwind.config.mjs"))
        );
    }

    #[test]
    fn test_writes_to_root_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let args = ThemeArgs {
            output: None,
            common: CommonArgs::default(),
        };

        let (result, logs) = capture(|| run_theme(&args, &config(dir.path())));

        assert!(result.is_ok());
        let written = fs::read_to_string(dir.path().join(TAILWIND_CONFIG)).unwrap();
        assert!(written.contains("petrona: [\"Petrona\", \"serif\"],"));
        assert_eq!(logs, vec![("theme".to_string(), format!("wrote {TAILWIND_CONFIG}"))]);
    }
}
