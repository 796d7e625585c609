//! 経済の状態遷移とセーブのデコードが返すエラー。

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// その id のエンティティが存在しない。
    #[error("unknown id: {id}")]
    NotFound { id: String },

    /// コストまたは閾値に届かない。表示用に必要量を持つ。
    #[error("need {required}, have {available}")]
    InsufficientResource { required: f64, available: f64 },

    /// 一度きりの商品をこの周回で購入済み。
    #[error("already owned: {id}")]
    AlreadyOwned { id: String },

    /// インポートデータが壊れている。
    #[error("could not decode save: {0}")]
    Decode(String),
}

/// 裏のキーバリューストアの失敗。セッションを止めることはない。
#[derive(Debug, Clone, PartialEq, Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);
