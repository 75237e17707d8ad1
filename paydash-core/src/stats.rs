//! Dashboard statistics
//!
//! Pure derivation over the transaction history. Recomputed in full on
//! every request; the source list is small and static, so no caching or
//! incremental update is attempted.

use serde::{Deserialize, Serialize};

/// Settlement status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Successful,
    Failed,
    Pending,
}

/// One row of the transaction history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub customer: String,
    pub email: String,
    pub date: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Aggregate figures shown on the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub pending_amount: f64,
    pub total_transactions: usize,
    pub success_rate: f64,
}

/// Derive dashboard stats from the full transaction list
pub fn compute_stats(transactions: &[Transaction]) -> DashboardStats {
    let total = transactions.len();
    let mut total_revenue = 0.0;
    let mut pending_amount = 0.0;
    let mut successful = 0usize;

    for tx in transactions {
        match tx.status {
            TransactionStatus::Successful => {
                total_revenue += tx.amount;
                successful += 1;
            }
            TransactionStatus::Pending => pending_amount += tx.amount,
            TransactionStatus::Failed => {}
        }
    }

    let success_rate = if total == 0 {
        0.0
    } else {
        successful as f64 / total as f64 * 100.0
    };

    DashboardStats {
        total_revenue,
        pending_amount,
        total_transactions: total,
        success_rate,
    }
}
