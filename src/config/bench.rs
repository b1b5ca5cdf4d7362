use crate::core::{SleepError, SleepKind, SleepResult};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchSettings {
    pub wait_times_us: Vec<u64>,
    pub trials: u32,
    pub kinds: Vec<SleepKind>,
    pub raise_timer_resolution: bool,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            wait_times_us: vec![
                50_000, 20_000, 10_000, 5_000, 1_000, 500, 100, 1, 100, 500, 1_000, 5_000,
                10_000, 20_000, 50_000,
            ],
            trials: 5,
            kinds: vec![SleepKind::Std, SleepKind::Precise, SleepKind::Deadline],
            raise_timer_resolution: true,
        }
    }
}

impl BenchSettings {
    pub fn wait_times(&self) -> impl Iterator<Item = Duration> + '_ {
        self.wait_times_us.iter().map(|&us| Duration::from_micros(us))
    }

    pub fn validate(&self) -> SleepResult<()> {
        if self.trials == 0 {
            return Err(SleepError::ConfigError(
                "trials must be at least 1".to_string(),
            ));
        }

        if self.kinds.is_empty() {
            return Err(SleepError::ConfigError(
                "at least one sleep kind must be selected".to_string(),
            ));
        }

        Ok(())
    }
}

pub struct BenchSettingsManager {
    settings_path: PathBuf,
}

impl BenchSettingsManager {
    pub fn new_with_path(path: PathBuf) -> Self {
        Self {
            settings_path: path,
        }
    }

    pub fn load(&self) -> SleepResult<BenchSettings> {
        if !self.settings_path.exists() {
            return Ok(BenchSettings::default());
        }

        let mut file = OpenOptions::new().read(true).open(&self.settings_path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        match serde_json::from_str::<BenchSettings>(&contents) {
            Ok(settings) => {
                settings.validate()?;
                Ok(settings)
            }
            Err(e) => {
                self.backup_corrupted_file()?;
                tracing::warn!(
                    path = %self.settings_path.display(),
                    error = %e,
                    "bench settings corrupted, using defaults"
                );
                Ok(BenchSettings::default())
            }
        }
    }

    fn backup_corrupted_file(&self) -> SleepResult<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let backup_path = self
            .settings_path
            .with_extension(format!("json.corrupt.{}", timestamp));

        std::fs::rename(&self.settings_path, &backup_path).map_err(|e| {
            SleepError::IoError(format!("Failed to backup corrupted settings: {}", e))
        })?;

        Ok(())
    }

    pub fn save(&self, settings: &BenchSettings) -> SleepResult<()> {
        let json = serde_json::to_string_pretty(settings)?;

        let temp_path = self.settings_path.with_extension("tmp");
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;

        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);

        std::fs::rename(&temp_path, &self.settings_path)?;
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.settings_path
    }
}
