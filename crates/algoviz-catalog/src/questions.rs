//! Built-in question definitions.
//!
//! Each entry carries the displayed snippet per language, a *complete*
//! line-mapping table for every marker its generator can emit, the default
//! input, and the explanation shown on the description tab. The mapping
//! tables are checked against the generators in the crate tests.

use std::collections::HashMap;

use algoviz_core::prelude::*;
use algoviz_core::{Difficulty, Explanation, Language, QuestionDefinition, QuestionId};

/// Lookup of question definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: HashMap<QuestionId, QuestionDefinition>,
}

impl QuestionCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of all built-in questions.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(two_sum_sorted());
        catalog.insert(binary_search());
        catalog.insert(bubble_sort());
        catalog.insert(max_subarray());
        catalog
    }

    /// Add a question, replacing any previous definition with the same id.
    pub fn insert(&mut self, question: QuestionDefinition) {
        let id = question.id;
        if self.questions.insert(id, question).is_some() {
            warn!("question {id} redefined");
        }
    }

    /// Look up a question definition.
    pub fn get(&self, id: QuestionId) -> Result<&QuestionDefinition> {
        self.questions
            .get(&id)
            .ok_or(Error::UnknownQuestion { id })
    }

    /// Resolve an abstract line marker for a question, by id.
    ///
    /// `None` covers all the absent cases: unknown question, no mapping
    /// table for the language, or no entry for the marker.
    pub fn resolve_line(
        &self,
        id: QuestionId,
        language: Language,
        abstract_line: u32,
    ) -> Option<u32> {
        let question = self.questions.get(&id)?;
        algoviz_core::resolve_line(question, language, abstract_line)
    }

    /// Known question ids, sorted.
    pub fn ids(&self) -> Vec<QuestionId> {
        let mut ids: Vec<QuestionId> = self.questions.keys().copied().collect();
        ids.sort();
        ids
    }
}

fn table(pairs: &[(u32, u32)]) -> HashMap<u32, u32> {
    pairs.iter().copied().collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Question 1: Two Sum II (sorted array, two pointers)
// ─────────────────────────────────────────────────────────────────────────────

fn two_sum_sorted() -> QuestionDefinition {
    let python = "\
def two_sum_sorted(nums, target):
    left, right = 0, len(nums) - 1
    while left < right:
        total = nums[left] + nums[right]
        if total == target:
            return [left, right]
        if total < target:
            left += 1
        else:
            right -= 1
    return []
";
    let javascript = "\
function twoSumSorted(nums, target) {
  let left = 0;
  let right = nums.length - 1;
  while (left < right) {
    const total = nums[left] + nums[right];
    if (total === target) {
      return [left, right];
    }
    if (total < target) {
      left += 1;
    } else {
      right -= 1;
    }
  }
  return [];
}
";
    let rust = "\
fn two_sum_sorted(nums: &[i64], target: i64) -> Option<(usize, usize)> {
    let (mut left, mut right) = (0, nums.len() - 1);
    while left < right {
        let total = nums[left] + nums[right];
        if total == target {
            return Some((left, right));
        }
        if total < target {
            left += 1;
        } else {
            right -= 1;
        }
    }
    None
}
";

    QuestionDefinition {
        id: QuestionId(1),
        title: "Two Sum II - Input Array Is Sorted".to_string(),
        difficulty: Difficulty::Easy,
        codes: HashMap::from([
            (Language::Python, python.to_string()),
            (Language::JavaScript, javascript.to_string()),
            (Language::Rust, rust.to_string()),
        ]),
        line_mappings: HashMap::from([
            (
                Language::Python,
                table(&[(1, 2), (2, 3), (3, 4), (4, 6), (5, 8), (6, 10), (7, 11)]),
            ),
            (
                Language::JavaScript,
                table(&[(1, 2), (2, 4), (3, 5), (4, 7), (5, 10), (6, 12), (7, 15)]),
            ),
            (
                Language::Rust,
                table(&[(1, 2), (2, 3), (3, 4), (4, 6), (5, 9), (6, 11), (7, 14)]),
            ),
        ]),
        default_input: "[2,7,11,15], 9".to_string(),
        explanation: Explanation {
            approach: "Because the array is sorted, a pointer at each end can walk inward: \
                       a sum that is too small means the left value must grow, a sum that \
                       is too large means the right value must shrink."
                .to_string(),
            steps: vec![
                "Place left at the first index and right at the last.".to_string(),
                "Sum the two pointed-at values.".to_string(),
                "If the sum matches the target, the indices are the answer.".to_string(),
                "If the sum is too small, advance left; if too large, retreat right."
                    .to_string(),
                "If the pointers meet, no pair exists.".to_string(),
            ],
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(1)".to_string(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Question 2: Binary Search
// ─────────────────────────────────────────────────────────────────────────────

fn binary_search() -> QuestionDefinition {
    let python = "\
def binary_search(nums, target):
    low, high = 0, len(nums) - 1
    while low <= high:
        mid = (low + high) // 2
        if nums[mid] == target:
            return mid
        if nums[mid] < target:
            low = mid + 1
        else:
            high = mid - 1
    return -1
";
    let javascript = "\
function binarySearch(nums, target) {
  let low = 0;
  let high = nums.length - 1;
  while (low <= high) {
    const mid = Math.floor((low + high) / 2);
    if (nums[mid] === target) {
      return mid;
    }
    if (nums[mid] < target) {
      low = mid + 1;
    } else {
      high = mid - 1;
    }
  }
  return -1;
}
";
    let rust = "\
fn binary_search(nums: &[i64], target: i64) -> i64 {
    let (mut low, mut high) = (0i64, nums.len() as i64 - 1);
    while low <= high {
        let mid = (low + high) / 2;
        if nums[mid as usize] == target {
            return mid;
        }
        if nums[mid as usize] < target {
            low = mid + 1;
        } else {
            high = mid - 1;
        }
    }
    -1
}
";

    QuestionDefinition {
        id: QuestionId(2),
        title: "Binary Search".to_string(),
        difficulty: Difficulty::Easy,
        codes: HashMap::from([
            (Language::Python, python.to_string()),
            (Language::JavaScript, javascript.to_string()),
            (Language::Rust, rust.to_string()),
        ]),
        line_mappings: HashMap::from([
            (
                Language::Python,
                table(&[(1, 2), (2, 3), (3, 4), (4, 6), (5, 8), (6, 10), (7, 11)]),
            ),
            (
                Language::JavaScript,
                table(&[(1, 2), (2, 4), (3, 5), (4, 7), (5, 10), (6, 12), (7, 15)]),
            ),
            (
                Language::Rust,
                table(&[(1, 2), (2, 3), (3, 4), (4, 6), (5, 9), (6, 11), (7, 14)]),
            ),
        ]),
        default_input: "[-4,1,3,5,9,12], 9".to_string(),
        explanation: Explanation {
            approach: "Repeatedly probe the middle of the remaining range. Each comparison \
                       discards half of the search space, so the target (or its absence) is \
                       known after logarithmically many probes."
                .to_string(),
            steps: vec![
                "Cover the whole array with low and high.".to_string(),
                "Probe the middle element.".to_string(),
                "A match ends the search with its index.".to_string(),
                "Otherwise discard the half that cannot contain the target.".to_string(),
                "An empty range means the target is absent.".to_string(),
            ],
            time_complexity: "O(log n)".to_string(),
            space_complexity: "O(1)".to_string(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Question 3: Bubble Sort
// ─────────────────────────────────────────────────────────────────────────────

fn bubble_sort() -> QuestionDefinition {
    let python = "\
def bubble_sort(nums):
    items = list(nums)
    for end in range(len(items) - 1, 0, -1):
        swapped = False
        for i in range(end):
            if items[i] > items[i + 1]:
                items[i], items[i + 1] = items[i + 1], items[i]
                swapped = True
        if not swapped:
            break
    return items
";
    let javascript = "\
function bubbleSort(nums) {
  const items = nums.slice();
  for (let end = items.length - 1; end > 0; end -= 1) {
    let swapped = false;
    for (let i = 0; i < end; i += 1) {
      if (items[i] > items[i + 1]) {
        [items[i], items[i + 1]] = [items[i + 1], items[i]];
        swapped = true;
      }
    }
    if (!swapped) {
      break;
    }
  }
  return items;
}
";
    let rust = "\
fn bubble_sort(nums: &[i64]) -> Vec<i64> {
    let mut items = nums.to_vec();
    for end in (1..items.len()).rev() {
        let mut swapped = false;
        for i in 0..end {
            if items[i] > items[i + 1] {
                items.swap(i, i + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
    items
}
";

    QuestionDefinition {
        id: QuestionId(3),
        title: "Bubble Sort".to_string(),
        difficulty: Difficulty::Easy,
        codes: HashMap::from([
            (Language::Python, python.to_string()),
            (Language::JavaScript, javascript.to_string()),
            (Language::Rust, rust.to_string()),
        ]),
        line_mappings: HashMap::from([
            (
                Language::Python,
                table(&[(1, 2), (2, 3), (3, 6), (4, 7), (5, 10), (6, 11)]),
            ),
            (
                Language::JavaScript,
                table(&[(1, 2), (2, 3), (3, 6), (4, 7), (5, 12), (6, 15)]),
            ),
            (
                Language::Rust,
                table(&[(1, 2), (2, 3), (3, 6), (4, 7), (5, 12), (6, 15)]),
            ),
        ]),
        default_input: "[5,1,4,2,8]".to_string(),
        explanation: Explanation {
            approach: "Sweep the array repeatedly, swapping adjacent values that are out of \
                       order. Each pass floats the largest remaining value to the end; a \
                       pass with no swaps means the rest is already sorted."
                .to_string(),
            steps: vec![
                "Compare each neighbouring pair in the unsorted prefix.".to_string(),
                "Swap a pair when the left value is larger.".to_string(),
                "After each pass, shrink the prefix by one.".to_string(),
                "Stop early when a whole pass makes no swaps.".to_string(),
            ],
            time_complexity: "O(n^2)".to_string(),
            space_complexity: "O(n)".to_string(),
        },
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Question 4: Maximum Subarray (Kadane)
// ─────────────────────────────────────────────────────────────────────────────

fn max_subarray() -> QuestionDefinition {
    let python = "\
def max_subarray(nums):
    best = nums[0]
    current = nums[0]
    for value in nums[1:]:
        current = max(value, current + value)
        if current > best:
            best = current
    return best
";
    let javascript = "\
function maxSubarray(nums) {
  let best = nums[0];
  let current = nums[0];
  for (let i = 1; i < nums.length; i += 1) {
    current = Math.max(nums[i], current + nums[i]);
    if (current > best) {
      best = current;
    }
  }
  return best;
}
";
    let rust = "\
fn max_subarray(nums: &[i64]) -> i64 {
    let mut best = nums[0];
    let mut current = nums[0];
    for &value in &nums[1..] {
        current = value.max(current + value);
        if current > best {
            best = current;
        }
    }
    best
}
";

    QuestionDefinition {
        id: QuestionId(4),
        title: "Maximum Subarray".to_string(),
        difficulty: Difficulty::Medium,
        codes: HashMap::from([
            (Language::Python, python.to_string()),
            (Language::JavaScript, javascript.to_string()),
            (Language::Rust, rust.to_string()),
        ]),
        line_mappings: HashMap::from([
            (
                Language::Python,
                table(&[(1, 2), (2, 4), (3, 5), (4, 7), (5, 8)]),
            ),
            (
                Language::JavaScript,
                table(&[(1, 2), (2, 4), (3, 5), (4, 7), (5, 10)]),
            ),
            (
                Language::Rust,
                table(&[(1, 2), (2, 4), (3, 5), (4, 7), (5, 10)]),
            ),
        ]),
        default_input: "[-2,1,-3,4,-1,2,1,-5,4]".to_string(),
        explanation: Explanation {
            approach: "Kadane's algorithm keeps the best sum of a subarray ending at the \
                       current position. At each value, either extend the previous run or \
                       restart, whichever is larger; the best of those running sums is the \
                       answer."
                .to_string(),
            steps: vec![
                "Seed both the running sum and the best with the first value.".to_string(),
                "At each later value, extend the run or restart at the value.".to_string(),
                "Record the running sum whenever it beats the best so far.".to_string(),
            ],
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(1)".to_string(),
        },
    }
}
