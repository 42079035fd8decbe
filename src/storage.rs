use crate::errors::AppError;
use crate::models::TrackerState;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habits.json"))
}

/// Reads the snapshot. Anything unusable yields an empty tracker.
pub async fn load_data(path: &Path) -> TrackerState {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<TrackerState>(&bytes) {
            Ok(state) if state.is_well_formed() => state,
            Ok(_) => {
                error!("discarding data file with inconsistent habit matrix");
                TrackerState::default()
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                TrackerState::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TrackerState::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            TrackerState::default()
        }
    }
}

pub async fn persist_data(path: &Path, state: &TrackerState) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(state)?;
    fs::write(path, payload).await?;
    Ok(())
}

pub async fn clear_data(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn unique_data_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("habit_tracker_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    fn sample() -> TrackerState {
        TrackerState {
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            total_days: 3,
            habits: vec!["Read".to_string(), "Walk".to_string()],
            completion_matrix: vec![vec![true, false, true], vec![false, false, true]],
        }
    }

    #[tokio::test]
    async fn persisted_snapshot_uses_camel_case_keys() {
        let path = unique_data_path("keys");
        persist_data(&path, &sample()).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).await.unwrap()).unwrap();
        assert_eq!(raw["startDate"], "2026-05-01");
        assert_eq!(raw["totalDays"], 3);
        assert_eq!(raw["habits"][1], "Walk");
        assert_eq!(raw["completionMatrix"][0][2], true);

        assert_eq!(load_data(&path).await, sample());
        clear_data(&path).await.unwrap();
    }

    #[tokio::test]
    async fn missing_file_loads_default() {
        let path = unique_data_path("missing");
        assert_eq!(load_data(&path).await, TrackerState::default());
        clear_data(&path).await.unwrap();
    }

    #[tokio::test]
    async fn malformed_file_loads_default() {
        let path = unique_data_path("malformed");
        fs::write(&path, b"{ not json").await.unwrap();
        assert_eq!(load_data(&path).await, TrackerState::default());

        fs::write(&path, br#"{"startDate":"2026-05-01","totalDays":3,"habits":["Read"],"completionMatrix":[[true]]}"#)
            .await
            .unwrap();
        assert_eq!(load_data(&path).await, TrackerState::default());

        fs::write(&path, br#"{"startDate":"2026-05-01","totalDays":4000000,"habits":[],"completionMatrix":[]}"#)
            .await
            .unwrap();
        assert_eq!(load_data(&path).await, TrackerState::default());

        fs::write(&path, br#"{"startDate":"+262142-12-01","totalDays":365,"habits":[],"completionMatrix":[]}"#)
            .await
            .unwrap();
        assert_eq!(load_data(&path).await, TrackerState::default());
        clear_data(&path).await.unwrap();
    }

    #[tokio::test]
    async fn clear_removes_snapshot() {
        let path = unique_data_path("clear");
        persist_data(&path, &sample()).await.unwrap();
        clear_data(&path).await.unwrap();
        assert!(!path.exists());
    }
}
