use std::path::PathBuf;

use clap::Parser;

const APP_DIR: &str = "fitness-tracker";
const DATA_FILE: &str = "workouts.json";

#[derive(Parser, Debug)]
#[command(version, about = "Log workouts and browse them in a single window")]
pub struct Args {
    /// JSON file the workouts are stored in
    #[arg(long, env = "FITNESS_TRACKER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// TTF font used for all text instead of the built-in one
    #[arg(long, env = "FITNESS_TRACKER_FONT")]
    pub font: Option<PathBuf>,

    /// Log level for this application (falls back to RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub font: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            data_file: args.data_file.unwrap_or_else(default_data_file),
            font: args.font,
            log_level: args.log_level,
        }
    }
}

/// `<platform data dir>/fitness-tracker/workouts.json`, or `./workouts.json`
/// when the platform has no data dir.
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join(DATA_FILE))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_file_wins() {
        let args = Args::try_parse_from(["fitness", "--data-file", "/tmp/w.json", "--log-level", "debug"]).unwrap();
        let settings = Settings::from(args);
        assert_eq!(settings.data_file, PathBuf::from("/tmp/w.json"));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.font, None);
    }

    #[test]
    fn default_data_file_is_named_workouts_json() {
        let path = default_data_file();
        assert_eq!(path.file_name().unwrap(), DATA_FILE);
    }
}
