//! ユーザーの初期データファイルの DTO

use serde::Deserialize;

/// `--users-file` の JSON 配列の 1 要素
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeedDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_no: String,
    #[serde(default)]
    pub online_status: bool,
}
