use crate::core::errors::SplitError;
use crate::core::models::settlement::{Debt, NetPosition, Settlement, SettlementBreakdown};
use crate::core::models::transaction::Transaction;
use indexmap::IndexMap;
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use std::collections::HashSet;

/// Decimal places kept on emitted settlements.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Consolidated debts keyed by ordered `(from, to)` pair, iterated in order of
/// first occurrence.
type ConsolidatedDebts = IndexMap<(String, String), f64>;

/// Turns a ledger snapshot into the minimal set of pairwise settlements.
///
/// The computation runs in three passes over invocation-local data:
/// 1. every transaction is expanded into raw `sharer -> payer` debts,
/// 2. raw debts are summed per ordered pair at full precision,
/// 3. opposite directions of each pair are netted and the remainder rounded.
///
/// Rounding only happens in the last pass.
pub struct SplitCalculator;

impl SplitCalculator {
    pub fn compute_settlements(
        transactions: &[Transaction],
        group_participant_ids: &[String],
    ) -> Result<Vec<Settlement>, SplitError> {
        let raw_debts = Self::expand_shares(transactions, group_participant_ids)?;
        let consolidated = Self::consolidate(&raw_debts);
        Ok(Self::net(&consolidated))
    }

    /// Same computation as [`SplitCalculator::compute_settlements`], keeping
    /// the intermediate stages.
    pub fn breakdown(
        transactions: &[Transaction],
        group_participant_ids: &[String],
    ) -> Result<SettlementBreakdown, SplitError> {
        let raw_debts = Self::expand_shares(transactions, group_participant_ids)?;
        let consolidated = Self::consolidate(&raw_debts);
        let settlements = Self::net(&consolidated);

        Ok(SettlementBreakdown {
            raw_debts,
            consolidated: consolidated
                .into_iter()
                .map(|((from, to), amount)| Debt { from, to, amount })
                .collect(),
            settlements,
        })
    }

    /// Amount paid, amount owed and their difference for every group
    /// participant, in group order, at full precision.
    pub fn net_positions(
        transactions: &[Transaction],
        group_participant_ids: &[String],
    ) -> Result<Vec<NetPosition>, SplitError> {
        let known: HashSet<&str> = group_participant_ids.iter().map(String::as_str).collect();
        let mut totals: IndexMap<&str, (f64, f64)> = group_participant_ids
            .iter()
            .map(|id| (id.as_str(), (0.0, 0.0)))
            .collect();

        for tx in transactions {
            let sharing_set = Self::resolve(tx, group_participant_ids, &known)?;
            let share = tx.amount / sharing_set.len() as f64;
            totals.entry(tx.payer.as_str()).or_insert((0.0, 0.0)).0 += tx.amount;
            for member in sharing_set {
                totals.entry(member.as_str()).or_insert((0.0, 0.0)).1 += share;
            }
        }

        Ok(totals
            .into_iter()
            .map(|(id, (paid, share))| NetPosition {
                participant_id: id.to_string(),
                paid,
                share,
                net: paid - share,
            })
            .collect())
    }

    fn resolve<'a>(
        tx: &'a Transaction,
        group_participant_ids: &'a [String],
        known: &HashSet<&str>,
    ) -> Result<&'a [String], SplitError> {
        let sharing_set = tx.sharing_set(group_participant_ids);
        if sharing_set.is_empty() {
            return Err(SplitError::EmptySharingSet {
                transaction_id: tx.id.clone(),
            });
        }
        if !known.contains(tx.payer.as_str()) {
            return Err(SplitError::UnknownPayer {
                transaction_id: tx.id.clone(),
                payer: tx.payer.clone(),
            });
        }
        Ok(sharing_set)
    }

    fn expand_shares(transactions: &[Transaction], group_participant_ids: &[String]) -> Result<Vec<Debt>, SplitError> {
        let known: HashSet<&str> = group_participant_ids.iter().map(String::as_str).collect();
        let mut raw_debts = Vec::new();

        for tx in transactions {
            let sharing_set = Self::resolve(tx, group_participant_ids, &known)?;
            let share = tx.amount / sharing_set.len() as f64;
            if share == 0.0 {
                continue;
            }
            raw_debts.extend(
                sharing_set
                    .iter()
                    .filter(|member| **member != tx.payer)
                    .map(|member| Debt {
                        from: member.clone(),
                        to: tx.payer.clone(),
                        amount: share,
                    }),
            );
        }

        debug!(
            "Expanded {} transactions into {} raw debts",
            transactions.len(),
            raw_debts.len()
        );
        Ok(raw_debts)
    }

    fn consolidate(raw_debts: &[Debt]) -> ConsolidatedDebts {
        let mut consolidated = ConsolidatedDebts::new();
        for debt in raw_debts {
            *consolidated
                .entry((debt.from.clone(), debt.to.clone()))
                .or_insert(0.0) += debt.amount;
        }
        debug!("Consolidated into {} directed pairs", consolidated.len());
        consolidated
    }

    fn net(consolidated: &ConsolidatedDebts) -> Vec<Settlement> {
        let mut visited: HashSet<(&str, &str)> = HashSet::new();
        let mut settlements = Vec::new();

        for ((from, to), &amount) in consolidated {
            if visited.contains(&(from.as_str(), to.as_str())) {
                continue;
            }
            visited.insert((from.as_str(), to.as_str()));
            visited.insert((to.as_str(), from.as_str()));

            let remainder = match consolidated.get(&(to.clone(), from.clone())) {
                None => Some((from, to, amount)),
                Some(&reverse) if amount > reverse => Some((from, to, amount - reverse)),
                Some(&reverse) if reverse > amount => Some((to, from, reverse - amount)),
                // equal in both directions: nothing is owed
                Some(_) => None,
            };

            let Some((debtor, creditor, owed)) = remainder else {
                debug!("Debts between {} and {} cancel out", from, to);
                continue;
            };

            let amount = round_currency(owed);
            if amount > 0.0 {
                settlements.push(Settlement {
                    from: debtor.clone(),
                    to: creditor.clone(),
                    amount,
                });
            } else {
                debug!("Dropping sub-cent remainder {} from {} to {}", owed, debtor, creditor);
            }
        }

        debug!("Netted into {} settlements", settlements.len());
        settlements
    }
}

/// Rounds half away from zero on the exact value of the binary float, so
/// `1.005` (stored as 1.00499...) becomes `1.0` while `0.125` becomes `0.13`.
pub fn round_currency(amount: f64) -> f64 {
    round_to_places(amount, CURRENCY_DECIMALS)
}

fn round_to_places(amount: f64, places: u32) -> f64 {
    match Decimal::from_f64_retain(amount) {
        Some(exact) => exact
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(amount),
        // out of Decimal range (or not finite)
        None => {
            let factor = 10f64.powi(places as i32);
            (amount * factor).round() / factor
        }
    }
}
