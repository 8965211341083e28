//! Global string interning.
//!
//! Identifiers, command names, and keyword text all flow through here so
//! that equality checks on hot paths (the parser comparing operator
//! names, the lexer folding command names to upper case) become O(1)
//! integer comparisons instead of string comparisons.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// A cheaply-copyable handle to an interned string.
///
/// Interning never frees: strings live for the life of the process
/// (leak-on-purpose), which is fine for the bounded vocabulary of
/// identifiers and keywords a single parse run produces.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

struct Table {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Table {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }
}

fn table() -> &'static RwLock<Table> {
    static TABLE: OnceLock<RwLock<Table>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(Table::new()))
}

impl Symbol {
    /// Interns `s`, returning the same symbol for equal strings.
    pub fn intern(s: &str) -> Self {
        let table = table();
        if let Some(&index) = table.read().unwrap().map.get(s) {
            return Symbol(index);
        }
        let mut table = table.write().unwrap();
        if let Some(&index) = table.map.get(s) {
            return Symbol(index);
        }
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let index = table.strings.len() as u32;
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Symbol(index)
    }

    /// Returns the interned string this symbol refers to.
    pub fn as_str(&self) -> &'static str {
        table().read().unwrap().strings[self.0 as usize]
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
