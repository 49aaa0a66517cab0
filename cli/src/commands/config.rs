use color_eyre::eyre::{Result, WrapErr};

use crate::config::{config_path, UserConfig};

pub fn run(path: bool, reset: bool, edit: bool) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        UserConfig::default()
            .save()
            .wrap_err("failed to write default config")?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| default_editor().to_string());

        if !config_file.exists() {
            UserConfig::default().save()?;
        }

        std::process::Command::new(&editor)
            .arg(&config_file)
            .status()
            .wrap_err_with(|| format!("failed to launch editor `{}`", editor))?;

        return Ok(());
    }

    let config = UserConfig::load();
    println!("Config file: {}", config_file.display());
    println!();
    println!("{}", toml::to_string_pretty(&config)?);

    Ok(())
}

fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "nano"
    }
}
