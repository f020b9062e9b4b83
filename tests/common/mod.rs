use std::sync::{LazyLock, Mutex};

use flexi_logger::{Logger, LoggerHandle};

/// Dynamic-array reference oracle. Every `SplaySequence` operation has
/// a direct, obviously-correct counterpart here; property tests run
/// both in lockstep and compare.
#[derive(Debug, Default, Clone)]
pub struct Oracle(pub Vec<i64>);

impl Oracle {
    pub fn insert(&mut self, value: i64, pos: usize) {
        self.0.insert(pos, value);
    }

    pub fn erase(&mut self, k: usize) {
        self.0.remove(k - 1);
    }

    pub fn sum(&self, l: usize, r: usize) -> i64 {
        self.0[l - 1..r].iter().sum()
    }

    pub fn assign(&mut self, l: usize, r: usize, value: i64) {
        for x in &mut self.0[l - 1..r] {
            *x = value;
        }
    }

    pub fn add(&mut self, l: usize, r: usize, delta: i64) {
        for x in &mut self.0[l - 1..r] {
            *x += delta;
        }
    }

    pub fn reverse(&mut self, l: usize, r: usize) {
        self.0[l - 1..r].reverse();
    }

    pub fn next_permutation(&mut self, l: usize, r: usize) {
        if !next_permutation(&mut self.0[l - 1..r]) {
            self.0[l - 1..r].reverse();
        }
    }

    pub fn prev_permutation(&mut self, l: usize, r: usize) {
        if !prev_permutation(&mut self.0[l - 1..r]) {
            self.0[l - 1..r].reverse();
        }
    }

    pub fn min(&self) -> i64 {
        self.0[0]
    }
}

/// Textbook next-permutation (Narayana Pandita). Returns `false` when
/// `slice` was already the greatest permutation, in which case it's
/// left sorted ascending.
fn next_permutation(slice: &mut [i64]) -> bool {
    if slice.len() < 2 {
        return false;
    }
    let mut i = slice.len() - 1;
    while i > 0 && slice[i - 1] >= slice[i] {
        i -= 1;
    }
    if i == 0 {
        slice.reverse();
        return false;
    }
    let pivot = i - 1;
    let mut j = slice.len() - 1;
    while slice[j] <= slice[pivot] {
        j -= 1;
    }
    slice.swap(pivot, j);
    slice[pivot + 1..].reverse();
    true
}

/// Mirror of [`next_permutation`].
fn prev_permutation(slice: &mut [i64]) -> bool {
    if slice.len() < 2 {
        return false;
    }
    let mut i = slice.len() - 1;
    while i > 0 && slice[i - 1] <= slice[i] {
        i -= 1;
    }
    if i == 0 {
        slice.reverse();
        return false;
    }
    let pivot = i - 1;
    let mut j = slice.len() - 1;
    while slice[j] >= slice[pivot] {
        j -= 1;
    }
    slice.swap(pivot, j);
    slice[pivot + 1..].reverse();
    true
}

#[allow(dead_code)]
pub static LOGGER: LazyLock<Mutex<LoggerHandle>> = LazyLock::new(|| {
    Mutex::new(
        Logger::try_with_env_or_str("info")
            .unwrap()
            .write_mode(flexi_logger::WriteMode::SupportCapture)
            .log_to_stdout()
            .start()
            .unwrap(),
    )
});

#[allow(dead_code)]
pub fn init_logger() {
    let _ = &*LOGGER;
}
