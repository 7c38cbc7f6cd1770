#![allow(dead_code)]

/// クローズのエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseError {
    /// 既にクローズ済み
    AlreadyClosed,
}
