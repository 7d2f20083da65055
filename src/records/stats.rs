use std::fmt;

use super::record::Record;
use super::schema::RecordKind;

const LOW_STOCK: f64 = 5.0;
const CRITICAL_STOCK: f64 = 2.0;

/// Letter grade for a mark out of 100
pub fn grade(marks: f64) -> char {
    if marks >= 90.0 {
        'A'
    } else if marks >= 80.0 {
        'B'
    } else if marks >= 70.0 {
        'C'
    } else {
        'F'
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    Critical,
    Low,
    Normal,
}

pub fn stock_level(stock: f64) -> StockLevel {
    if stock <= CRITICAL_STOCK {
        StockLevel::Critical
    } else if stock <= LOW_STOCK {
        StockLevel::Low
    } else {
        StockLevel::Normal
    }
}

/// Summary figures shown above a record table
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectionStats {
    Count {
        total: usize,
    },
    Roster {
        total: usize,
        /// Rounded mean, `None` for an empty roster
        average_marks: Option<i64>,
    },
    Library {
        total: usize,
        available: usize,
        issued: usize,
    },
    Inventory {
        total: usize,
        total_value: f64,
        low_stock: usize,
    },
}

impl CollectionStats {
    pub fn compute(kind: RecordKind, records: &[Record]) -> Self {
        let total = records.len();
        match kind {
            RecordKind::Roster => {
                let sum: f64 = records.iter().filter_map(|r| r.number("marks")).sum();
                let average_marks = (total > 0).then(|| (sum / total as f64).round() as i64);
                CollectionStats::Roster {
                    total,
                    average_marks,
                }
            }
            RecordKind::Book => {
                let available = records
                    .iter()
                    .filter(|r| r.flag("available") == Some(true))
                    .count();
                CollectionStats::Library {
                    total,
                    available,
                    issued: total - available,
                }
            }
            RecordKind::Product => {
                let total_value = records
                    .iter()
                    .map(|r| r.number("price").unwrap_or(0.0) * r.number("stock").unwrap_or(0.0))
                    .sum();
                let low_stock = records
                    .iter()
                    .filter(|r| r.number("stock").is_some_and(|s| s <= LOW_STOCK))
                    .count();
                CollectionStats::Inventory {
                    total,
                    total_value,
                    low_stock,
                }
            }
            RecordKind::Student | RecordKind::Employee => CollectionStats::Count { total },
        }
    }

    pub fn total(&self) -> usize {
        match *self {
            CollectionStats::Count { total }
            | CollectionStats::Roster { total, .. }
            | CollectionStats::Library { total, .. }
            | CollectionStats::Inventory { total, .. } => total,
        }
    }
}

impl fmt::Display for CollectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionStats::Count { total } => write!(f, "Total: {}", total),
            CollectionStats::Roster {
                total,
                average_marks,
            } => match average_marks {
                Some(avg) => write!(f, "Total: {} | Avg marks: {}", total, avg),
                None => write!(f, "Total: {} | Avg marks: -", total),
            },
            CollectionStats::Library {
                total,
                available,
                issued,
            } => write!(
                f,
                "Total: {} | Available: {} | Issued: {}",
                total, available, issued
            ),
            CollectionStats::Inventory {
                total,
                total_value,
                low_stock,
            } => write!(
                f,
                "Products: {} | Value: ${} | Low stock: {}",
                total,
                format_amount(*total_value),
                low_stock
            ),
        }
    }
}

/// Thousands-separated amount, with cents only when present
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let frac = (cents % 100).abs();

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if cents < 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{:02}", sign, grouped, frac)
    }
}
