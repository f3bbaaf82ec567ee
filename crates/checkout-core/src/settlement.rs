//! # Settlement Solver
//!
//! Decides which notes a customer hands over for a given price and how much
//! change comes back.
//!
//! ## Candidates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Exact        any notes adding up to the amount due                     │
//! │                                                                         │
//! │  Overpay      every note below some value v, one or more notes of v,    │
//! │               any notes above v, with 0 < change < v                    │
//! │               (the customer hands over small notes until the next note  │
//! │               no longer fits, then gives the smallest one left)         │
//! │                                                                         │
//! │  Best         lowest rank (see SettlementPreference)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Notes are addressed by their index in the wallet, so two $5 notes are
//! never confused. Equal-valued notes are interchangeable for the search
//! itself: notes are grouped by value, and for every suffix of the groups
//! the solver tabulates each reachable sum (up to amount due plus the
//! largest note) with the fewest notes reaching it. Both candidate kinds
//! are read off those tables, so the cost grows with the number of
//! distinct sums rather than the number of note subsets.
//!
//! ## Example
//! ```rust
//! use checkout_core::money::Money;
//! use checkout_core::note::DenominationSet;
//! use checkout_core::settlement::settle;
//!
//! let notes = DenominationSet::default().notes(&[50, 20, 20, 20]).unwrap();
//! let settlement = settle(&notes, Money::from_units(60)).unwrap();
//!
//! assert_eq!(settlement.used, vec![1, 2, 3]);
//! assert!(settlement.is_exact());
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult, ValidationError};
use crate::money::Money;
use crate::note::Note;

// =============================================================================
// Preference
// =============================================================================

/// Total order used to pick the best candidate payment.
///
/// | Preference    | Primary key   | Secondary key |
/// |---------------|---------------|---------------|
/// | `LeastChange` | change        | notes used    |
/// | `FewestNotes` | notes used    | change        |
///
/// Candidates equal on both keys are broken deterministically: an exact
/// payment spends more of its lower notes, an overpayment keeps the one
/// with the lowest pivot note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPreference {
    /// Prefer exact payment, then the fewest notes.
    #[default]
    LeastChange,
    /// Prefer the fewest notes, then the least change.
    FewestNotes,
}

impl SettlementPreference {
    fn rank(&self, plan: &Plan) -> (u64, u64) {
        match self {
            SettlementPreference::LeastChange => (plan.change, plan.count),
            SettlementPreference::FewestNotes => (plan.count, plan.change),
        }
    }
}

impl fmt::Display for SettlementPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettlementPreference::LeastChange => write!(f, "least_change"),
            SettlementPreference::FewestNotes => write!(f, "fewest_notes"),
        }
    }
}

impl FromStr for SettlementPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "least_change" | "exact" => Ok(SettlementPreference::LeastChange),
            "fewest_notes" | "fewest" => Ok(SettlementPreference::FewestNotes),
            other => Err(ValidationError::InvalidFormat {
                field: "settlement".to_string(),
                reason: format!("unknown preference '{}', expected least_change or fewest_notes", other),
            }),
        }
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Outcome of settling one amount from one wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Settlement {
    /// Indices into the wallet of the notes handed over, ascending.
    pub used: Vec<usize>,
    /// Sum of the notes handed over.
    pub paid: Money,
    /// What the cashier gives back (`paid - amount due`).
    pub change: Money,
}

impl Settlement {
    fn nothing_due() -> Self {
        Settlement {
            used: Vec::new(),
            paid: Money::zero(),
            change: Money::zero(),
        }
    }

    /// Number of notes handed over.
    #[inline]
    pub fn note_count(&self) -> usize {
        self.used.len()
    }

    /// True when no change is returned.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.change.is_zero()
    }

    /// Resolves [`Settlement::used`] against the wallet it was computed from.
    pub fn notes(&self, wallet: &[Note]) -> Vec<Note> {
        self.used.iter().filter_map(|&i| wallet.get(i).copied()).collect()
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Settles `amount_due` from `notes` using [`SettlementPreference::LeastChange`].
pub fn settle(notes: &[Note], amount_due: Money) -> CheckoutResult<Settlement> {
    settle_with(notes, amount_due, SettlementPreference::default())
}

/// Settles `amount_due` from `notes` ranking candidates by `preference`.
///
/// ## Errors
/// - `InsufficientFunds` when the notes add up to less than `amount_due`
/// - `SettlementUnreachable` if the search comes back empty anyway
pub fn settle_with(
    notes: &[Note],
    amount_due: Money,
    preference: SettlementPreference,
) -> CheckoutResult<Settlement> {
    let funds: Money = notes.iter().map(Note::value).sum();
    if funds < amount_due {
        return Err(CheckoutError::InsufficientFunds {
            funds,
            price: amount_due,
        });
    }

    if amount_due.is_zero() {
        return Ok(Settlement::nothing_due());
    }

    let solver = Solver::new(notes, amount_due.units(), preference);
    solver
        .best_plan()
        .and_then(|plan| solver.settlement(plan))
        .ok_or(CheckoutError::SettlementUnreachable { amount_due })
}

// =============================================================================
// Solver
// =============================================================================

/// All wallet notes sharing one value.
struct Group {
    value: u64,
    indices: Vec<usize>,
}

/// A candidate payment, before its notes are picked out.
#[derive(Debug, Clone, Copy)]
struct Plan {
    /// For an overpayment, the group handed over partly and how many of its
    /// notes; every lower group is handed over whole.
    pivot: Option<(usize, usize)>,
    /// What the groups after the pivot (all groups when exact) contribute.
    rest: u64,
    count: u64,
    change: u64,
}

/// Fewest notes reaching one sum from a suffix of the groups.
#[derive(Debug, Clone, Copy)]
struct Cell {
    count: u64,
    /// Notes of the suffix's first group in that payment.
    take: usize,
}

struct Solver {
    /// Ascending by value.
    groups: Vec<Group>,
    amount_due: u64,
    preference: SettlementPreference,
    /// `levels[g]` holds every sum reachable with groups `g..`; the last
    /// level is just the empty payment.
    levels: Vec<BTreeMap<u64, Cell>>,
}

impl Solver {
    fn new(notes: &[Note], amount_due: u64, preference: SettlementPreference) -> Self {
        let mut by_value: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (index, note) in notes.iter().enumerate() {
            by_value.entry(note.value().units()).or_default().push(index);
        }

        let groups: Vec<Group> = by_value
            .into_iter()
            .map(|(value, indices)| Group { value, indices })
            .collect();
        let largest = groups.last().map_or(0, |group| group.value);
        let levels = reachable_sums(&groups, amount_due.saturating_add(largest));

        Solver {
            groups,
            amount_due,
            preference,
            levels,
        }
    }

    fn best_plan(&self) -> Option<Plan> {
        let due = self.amount_due;
        let mut best: Option<Plan> = None;
        let mut consider = |plan: Plan| {
            let better = best
                .as_ref()
                .map_or(true, |current| self.preference.rank(&plan) < self.preference.rank(current));
            if better {
                best = Some(plan);
            }
        };

        if let Some(cell) = self.levels.first().and_then(|level| level.get(&due)) {
            consider(Plan {
                pivot: None,
                rest: due,
                count: cell.count,
                change: 0,
            });
        }

        // Sum and count of the groups below the pivot.
        let mut below = 0u64;
        let mut below_count = 0u64;
        for (pivot, group) in self.groups.iter().enumerate() {
            if below >= due {
                break;
            }
            let Some(after) = self.levels.get(pivot + 1) else {
                break;
            };
            let ceiling = due.saturating_add(group.value);

            for m in 1..=group.indices.len() {
                let Some(base) = (m as u64)
                    .checked_mul(group.value)
                    .and_then(|sum| sum.checked_add(below))
                else {
                    break;
                };
                if base >= ceiling {
                    break;
                }
                let lowest_rest = if base > due { 0 } else { due - base + 1 };

                for (&rest, cell) in after.range(lowest_rest..) {
                    let Some(total) = base.checked_add(rest) else {
                        break;
                    };
                    if total >= ceiling {
                        break;
                    }
                    consider(Plan {
                        pivot: Some((pivot, m)),
                        rest,
                        count: below_count + m as u64 + cell.count,
                        change: total - due,
                    });
                }
            }

            below = below.saturating_add(group.value.saturating_mul(group.indices.len() as u64));
            below_count += group.indices.len() as u64;
        }

        best
    }

    /// Picks the wallet notes realising `plan`.
    fn settlement(&self, plan: Plan) -> Option<Settlement> {
        let mut taken: Vec<usize> = Vec::with_capacity(self.groups.len());
        let first_free = match plan.pivot {
            Some((pivot, m)) => {
                taken.extend(self.groups.iter().take(pivot).map(|group| group.indices.len()));
                taken.push(m);
                pivot + 1
            }
            None => 0,
        };

        let mut rest = plan.rest;
        for (g, group) in self.groups.iter().enumerate().skip(first_free) {
            let cell = self.levels.get(g)?.get(&rest)?;
            taken.push(cell.take);
            rest = rest.checked_sub(cell.take as u64 * group.value)?;
        }

        let mut used = Vec::with_capacity(plan.count as usize);
        let mut paid = Money::zero();
        for (group, &count) in self.groups.iter().zip(&taken) {
            used.extend(group.indices.iter().take(count));
            paid += Money::from_units(group.value) * count as u64;
        }
        used.sort_unstable();

        Some(Settlement {
            used,
            paid,
            change: Money::from_units(plan.change),
        })
    }
}

/// Tabulates, for every suffix `g..` of `groups`, each sum up to `limit`
/// reachable with those notes and the fewest notes reaching it.
///
/// Equal counts keep the payment taking more of the suffix's first group.
fn reachable_sums(groups: &[Group], limit: u64) -> Vec<BTreeMap<u64, Cell>> {
    let mut levels = vec![BTreeMap::from([(0, Cell { count: 0, take: 0 })])];

    for group in groups.iter().rev() {
        let mut level: BTreeMap<u64, Cell> = BTreeMap::new();
        if let Some(next) = levels.last() {
            for (&sum, cell) in next {
                for take in 0..=group.indices.len() {
                    let Some(reached) = (take as u64)
                        .checked_mul(group.value)
                        .and_then(|spent| spent.checked_add(sum))
                        .filter(|&reached| reached <= limit)
                    else {
                        break;
                    };

                    let candidate = Cell {
                        count: cell.count + take as u64,
                        take,
                    };
                    let entry = level.entry(reached).or_insert(candidate);
                    if (candidate.count, std::cmp::Reverse(candidate.take))
                        < (entry.count, std::cmp::Reverse(entry.take))
                    {
                        *entry = candidate;
                    }
                }
            }
        }
        levels.push(level);
    }

    levels.reverse();
    levels
}

// =============================================================================
// Unit Tests
// =============================================================================
