//! Circular suffix array.
//!
//! Sorts the `n` cyclic rotations of a byte string without materializing
//! them. Every rotation is identified by its start index; comparisons look
//! at a packed 7-byte prefix first and only fall back to a byte-wise walk
//! around the string when the prefixes tie.
//!
//! The sort is a Bentley-McIlroy 3-way quicksort over the index array:
//! insertion sort for tiny ranges, median-of-3 pivots for small ranges and
//! Tukey's ninther for large ones. Equal rotations (periodic input) land in
//! the middle partition and are never compared again.

use log::trace;
use std::cmp::Ordering;

/// Ranges at or below this size are finished with insertion sort.
const INSERTION_SORT_CUTOFF: usize = 8;

/// Ranges at or below this size pick the pivot as a median of 3.
const MEDIAN_OF_3_CUTOFF: usize = 40;

/// Number of leading symbols packed into each rotation's prefix key.
const MAX_PREFIX_LEN: usize = 7;

/// Bits per packed symbol.
const SYMBOL_BITS: usize = 8;

/// Ranges at least this large sort their two partitions on separate threads.
#[cfg(feature = "parallel")]
const PARALLEL_CUTOFF: usize = 16 * 1024;

/// The sorted circular rotations of a byte string.
///
/// The array borrows the string it was built from: the packed prefixes
/// describe that string only.
///
/// # Example
///
/// ```
/// use oxibwt_transform::CircularSuffixArray;
///
/// let csa = CircularSuffixArray::new(b"ABRACADABRA!");
/// assert_eq!(csa.len(), 12);
/// assert_eq!(csa.index(0), 11); // "!ABRACADABRA" sorts first
/// assert_eq!(csa.index(3), 0); // the original string is row 3
/// ```
#[derive(Debug, Clone)]
pub struct CircularSuffixArray<'a> {
    data: &'a [u8],
    /// Symbols covered by each prefix key, `min(n, 7)`.
    prefix_len: usize,
    /// Packed leading symbols of rotation `i`.
    prefixes: Vec<u64>,
    /// `indices[k]` is the start of the rotation in sorted row `k`.
    indices: Vec<usize>,
}

impl<'a> CircularSuffixArray<'a> {
    /// Build the circular suffix array of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        let prefix_len = data.len().min(MAX_PREFIX_LEN);
        let mut csa = Self {
            data,
            prefix_len,
            prefixes: rolling_prefixes(data, prefix_len),
            indices: Vec::new(),
        };

        let mut indices: Vec<usize> = (0..data.len()).collect();
        csa.sort(&mut indices);
        csa.indices = indices;

        trace!("sorted {} circular rotations", data.len());
        csa
    }

    /// Number of rotations (the length of the source string).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the source string is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Start index of the rotation in sorted row `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k >= self.len()`.
    pub fn index(&self, k: usize) -> usize {
        self.indices[k]
    }

    /// All rotation starts, in sorted order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Consume the array, returning the sorted rotation starts.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    /// The bytes of rotation `start`, in order.
    pub fn rotation(&self, start: usize) -> impl Iterator<Item = u8> + '_ {
        self.data[start..]
            .iter()
            .chain(&self.data[..start])
            .copied()
    }

    /// Compare rotations `a` and `b` in circular lexicographic order.
    pub fn compare_rotations(&self, a: usize, b: usize) -> Ordering {
        match self.prefixes[a].cmp(&self.prefixes[b]) {
            Ordering::Equal => {}
            other => return other,
        }

        let n = self.data.len();
        let mut i = wrap(a + self.prefix_len, n);
        let mut j = wrap(b + self.prefix_len, n);
        let mut remaining = n - self.prefix_len;

        // Compare contiguous runs up to the next wrap of either rotation.
        while remaining > 0 {
            let run = remaining.min(n - i).min(n - j);
            match self.data[i..i + run].cmp(&self.data[j..j + run]) {
                Ordering::Equal => {}
                other => return other,
            }
            remaining -= run;
            i = wrap(i + run, n);
            j = wrap(j + run, n);
        }

        Ordering::Equal
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.compare_rotations(a, b) == Ordering::Less
    }

    #[inline]
    fn equal(&self, a: usize, b: usize) -> bool {
        self.compare_rotations(a, b) == Ordering::Equal
    }

    fn sort(&self, a: &mut [usize]) {
        let len = a.len();

        if len <= INSERTION_SORT_CUTOFF {
            self.insertion_sort(a);
            return;
        }

        let pivot = if len <= MEDIAN_OF_3_CUTOFF {
            self.median3(a, 0, len / 2, len - 1)
        } else {
            let eps = len / 8;
            let mid = len / 2;
            let m1 = self.median3(a, 0, eps, 2 * eps);
            let m2 = self.median3(a, mid - eps, mid, mid + eps);
            let m3 = self.median3(a, len - 1 - 2 * eps, len - 1 - eps, len - 1);
            self.median3(a, m1, m2, m3)
        };
        a.swap(0, pivot);

        let (lt, gt) = self.partition(a);
        let (left, rest) = a.split_at_mut(lt);
        let right = &mut rest[gt - lt..];

        #[cfg(feature = "parallel")]
        {
            if len >= PARALLEL_CUTOFF {
                rayon::join(|| self.sort(left), || self.sort(right));
                return;
            }
        }

        self.sort(left);
        self.sort(right);
    }

    /// Bentley-McIlroy 3-way partition around `a[0]`.
    ///
    /// Returns `(lt, gt)` such that `a[..lt]` < pivot, `a[lt..gt]` == pivot
    /// and `a[gt..]` > pivot.
    fn partition(&self, a: &mut [usize]) -> (usize, usize) {
        let hi = a.len() - 1;
        let v = a[0];
        let (mut i, mut j) = (0, hi + 1);
        let (mut p, mut q) = (0, hi + 1);

        loop {
            loop {
                i += 1;
                if !self.less(a[i], v) || i == hi {
                    break;
                }
            }
            loop {
                j -= 1;
                if !self.less(v, a[j]) || j == 0 {
                    break;
                }
            }

            // Pointers meet on a key equal to the pivot.
            if i == j && self.equal(a[i], v) {
                p += 1;
                a.swap(p, i);
            }
            if i >= j {
                break;
            }

            a.swap(i, j);
            if self.equal(a[i], v) {
                p += 1;
                a.swap(p, i);
            }
            if self.equal(a[j], v) {
                q -= 1;
                a.swap(q, j);
            }
        }

        // Swing the equal keys parked at both ends into the middle.
        let mut lt = j + 1;
        for k in 0..=p {
            lt -= 1;
            a.swap(k, lt);
        }
        let mut gt = j + 1;
        for k in (q..=hi).rev() {
            a.swap(k, gt);
            gt += 1;
        }

        (lt, gt)
    }

    fn insertion_sort(&self, a: &mut [usize]) {
        for i in 1..a.len() {
            let mut j = i;
            while j > 0 && self.less(a[j], a[j - 1]) {
                a.swap(j, j - 1);
                j -= 1;
            }
        }
    }

    /// Position (among `i`, `j`, `k`) of the median rotation.
    fn median3(&self, a: &[usize], i: usize, j: usize, k: usize) -> usize {
        if self.less(a[i], a[j]) {
            if self.less(a[j], a[k]) {
                j
            } else if self.less(a[i], a[k]) {
                k
            } else {
                i
            }
        } else if self.less(a[k], a[j]) {
            j
        } else if self.less(a[k], a[i]) {
            k
        } else {
            i
        }
    }
}

#[inline]
fn wrap(i: usize, n: usize) -> usize {
    if i >= n { i - n } else { i }
}

/// Pack the first `width` symbols of every rotation into a `u64`.
///
/// Each key is derived from the previous one by dropping the outgoing
/// symbol and shifting in the next, so the whole table costs O(n).
fn rolling_prefixes(data: &[u8], width: usize) -> Vec<u64> {
    let n = data.len();
    let mut prefixes = Vec::with_capacity(n);
    if n == 0 {
        return prefixes;
    }

    let mut key = data[..width]
        .iter()
        .fold(0u64, |key, &b| (key << SYMBOL_BITS) | b as u64);
    prefixes.push(key);

    let top_shift = SYMBOL_BITS * (width - 1);
    let mut incoming = width % n;
    for &outgoing in &data[..n - 1] {
        key -= (outgoing as u64) << top_shift;
        key = (key << SYMBOL_BITS) | data[incoming] as u64;
        prefixes.push(key);
        incoming = wrap(incoming + 1, n);
    }

    prefixes
}
