//! Combination enumeration
//!
//! For one controller and `n` selected modules, every module subset is
//! produced exactly once: sizes `0..=n` in increasing order, and within a size
//! in lexicographic index order over the selection. The generation order is
//! the ranking tie-break, so it must stay stable.

use ioplan_model::HardwareUnit;

/// Number of subsets of `n` modules (`2^n`), saturating at `u64::MAX`
pub fn combination_count(n: usize) -> u64 {
    u32::try_from(n)
        .ok()
        .and_then(|n| 1u64.checked_shl(n))
        .unwrap_or(u64::MAX)
}

/// Lazy iterator over all subsets of a slice, by size then lexicographically
///
/// ```
/// use ioplan_calc::Combinations;
///
/// let items = ["a", "b", "c"];
/// let subsets: Vec<Vec<&str>> = Combinations::new(&items)
///     .map(|s| s.into_iter().copied().collect())
///     .collect();
/// assert_eq!(subsets.len(), 8);
/// assert_eq!(subsets[0], Vec::<&str>::new());
/// assert_eq!(subsets[1], vec!["a"]);
/// assert_eq!(subsets[4], vec!["a", "b"]);
/// assert_eq!(subsets[7], vec!["a", "b", "c"]);
/// ```
pub struct Combinations<'a, T> {
    items: &'a [T],
    /// Current subset size
    size: usize,
    /// Indices of the next subset to emit, `None` once exhausted
    indices: Option<Vec<usize>>,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self {
            items,
            size: 0,
            indices: Some(Vec::new()),
        }
    }

    fn advance(&mut self) {
        let n = self.items.len();
        let Some(indices) = self.indices.as_mut() else {
            return;
        };
        let r = self.size;

        // Rightmost index that can still move right
        if let Some(i) = (0..r).rev().find(|&i| indices[i] != i + n - r) {
            indices[i] += 1;
            for j in i + 1..r {
                indices[j] = indices[j - 1] + 1;
            }
            return;
        }

        // Size exhausted, start the next size
        if r < n {
            self.size = r + 1;
            *indices = (0..self.size).collect();
        } else {
            self.indices = None;
        }
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        let subset = self.indices.as_ref()?.iter().map(|&i| &items[i]).collect();
        self.advance();
        Some(subset)
    }
}

/// One candidate: a controller plus a subset of the selected modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination<'a> {
    /// Position in generation order across the whole request
    pub ordinal: usize,
    pub controller: &'a HardwareUnit,
    /// Modules in selection order
    pub modules: Vec<&'a HardwareUnit>,
}

impl Combination<'_> {
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// `"CONTROLLER"` or `"CONTROLLER + XM1 + XM2"`
    pub fn label(&self) -> String {
        std::iter::once(self.controller.name.as_str())
            .chain(self.modules.iter().map(|m| m.name.as_str()))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Every combination for each controller in turn
///
/// Controllers are walked in the given order; for each, all `2^n` module
/// subsets follow in [`Combinations`] order. Ordinals run across the whole
/// sequence.
pub fn enumerate<'a>(
    controllers: &'a [&'a HardwareUnit],
    modules: &'a [&'a HardwareUnit],
) -> impl Iterator<Item = Combination<'a>> + 'a {
    controllers
        .iter()
        .flat_map(move |&controller| {
            Combinations::new(modules).map(move |subset| Combination {
                ordinal: 0,
                controller,
                modules: subset.into_iter().copied().collect(),
            })
        })
        .enumerate()
        .map(|(ordinal, combination)| Combination {
            ordinal,
            ..combination
        })
}
