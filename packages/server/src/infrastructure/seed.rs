//! ユーザーの初期データ読み込み
//!
//! ユーザーの登録・編集は別サービスの責務なので、このサーバーは起動時に
//! JSON ファイル（`UserSeedDto` の配列）からユーザーを読み込んでストアに入れる。

use std::path::Path;

use thiserror::Error;

use crate::{domain::User, infrastructure::dto::seed::UserSeedDto};

/// 初期データの読み込みエラー
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read users file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse users file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a JSON array of user records.
pub fn parse_users(json: &str) -> Result<Vec<User>, serde_json::Error> {
    let seeds: Vec<UserSeedDto> = serde_json::from_str(json)?;
    Ok(seeds.into_iter().map(User::from).collect())
}

/// Loads user records from a JSON file.
pub fn load_users_from_file(path: &Path) -> Result<Vec<User>, SeedError> {
    let display = path.display().to_string();
    let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: display.clone(),
        source,
    })?;
    parse_users(&json).map_err(|source| SeedError::Parse {
        path: display,
        source,
    })
}

/// Users seeded when no users file is configured.
pub fn demo_users() -> Vec<User> {
    [
        (1, "Hanako", "Yamada", "09011112222"),
        (2, "Taro", "Sato", "09033334444"),
        (3, "Yuki", "Tanaka", "09055556666"),
    ]
    .into_iter()
    .map(|(id, first, last, phone)| {
        User::from(UserSeedDto {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone_no: phone.to_string(),
            online_status: false,
        })
    })
    .collect()
}
