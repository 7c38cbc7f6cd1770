use crate::domain::reservation::{ClosedReservation, OpenReservation, Reservation};
use crate::domain::TransactionId;
use crate::ports::ledger::{Ledger as LedgerTrait, LedgerError, Result};
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use std::sync::Mutex;

struct LedgerState {
    next_id: u64,
    entries: Vec<Reservation>,
}

/// Ledgerのインメモリ実装
///
/// エントリは追記順のVecで保持する追記専用ログ。クローズはエントリの
/// 置き換えとして記録され、エントリ自体が削除されることはない。
/// 取引IDのカウンタはエントリと同じMutexの下で採番される。
#[allow(dead_code)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

#[allow(dead_code)]
impl Ledger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState {
                next_id: 1,
                entries: Vec::new(),
            }),
        }
    }

    /// 現在の台帳のスナップショット（追記順）
    pub fn snapshot(&self) -> Vec<Reservation> {
        self.state.lock().unwrap().entries.clone()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerTrait for Ledger {
    async fn next_transaction_id(&self) -> Result<TransactionId> {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        Ok(TransactionId::from_u64(id))
    }

    async fn append(&self, entry: OpenReservation) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state
            .entries
            .iter()
            .any(|e| e.transaction_id() == entry.transaction_id)
        {
            return Err(LedgerError::DuplicateTransaction(entry.transaction_id));
        }
        state.entries.push(Reservation::Open(entry));
        Ok(())
    }

    async fn get(&self, transaction_id: TransactionId) -> Result<Option<Reservation>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .iter()
            .find(|e| e.transaction_id() == transaction_id)
            .cloned())
    }

    async fn record_close(&self, entry: ClosedReservation) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let position = state
            .entries
            .iter()
            .position(|e| e.transaction_id() == entry.transaction_id)
            .ok_or(LedgerError::UnknownTransaction(entry.transaction_id))?;

        // 記録済みの最終費用は上書きしない
        if matches!(state.entries[position], Reservation::Closed(_)) {
            return Err(LedgerError::AlreadyClosed(entry.transaction_id));
        }

        state.entries[position] = Reservation::Closed(entry);
        Ok(())
    }

    fn stream(&self) -> BoxStream<'static, Result<Reservation>> {
        let snapshot = self.snapshot();
        futures::stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }
}
