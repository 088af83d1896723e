//! Variable registry
//!
//! Declared variables are numbered in declaration order and filed into the
//! category tables the grammar consults: a numeric comparison only looks at
//! [`Category::Numeric`], a quantifier only at the list tables, and so on.
//! Every table is a character trie, so the grammar can ask for the longest
//! declared name at the start of its remaining input.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Identifier assigned to a declared variable, starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(u64);

impl VariableId {
    /// Wrap a raw index
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// The raw index
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declared type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Boolean,
    Integer,
    #[serde(rename = "realnum")]
    Real,
    String,
    /// List of integers
    Integers,
    /// List of strings
    Strings,
}

impl VarType {
    /// Every type, in declaration-keyword order
    pub const ALL: [VarType; 6] = [
        VarType::Boolean,
        VarType::Integer,
        VarType::Real,
        VarType::String,
        VarType::Integers,
        VarType::Strings,
    ];

    /// Keyword naming this type
    pub fn name(self) -> &'static str {
        match self {
            VarType::Boolean => "boolean",
            VarType::Integer => "integer",
            VarType::Real => "realnum",
            VarType::String => "string",
            VarType::Integers => "integers",
            VarType::Strings => "strings",
        }
    }

    /// Tables a variable of this type is filed into, besides [`Category::Any`]
    pub fn categories(self) -> &'static [Category] {
        match self {
            VarType::Boolean => &[Category::Boolean],
            VarType::Integer => &[Category::Integer, Category::Numeric],
            VarType::Real => &[Category::Numeric],
            VarType::String => &[Category::String],
            VarType::Integers => &[Category::IntegerList, Category::List],
            VarType::Strings => &[Category::StringList, Category::List],
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VarType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| Error::UnknownVarType(s.to_string()))
    }
}

/// Lookup table consulted by a grammar position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Boolean,
    Integer,
    /// Integers and reals
    Numeric,
    String,
    IntegerList,
    StringList,
    /// Integer and string lists
    List,
    /// Every declared variable
    Any,
}

impl Category {
    const COUNT: usize = 8;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    id: Option<VariableId>,
}

/// Name table with longest-match prefix lookup
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    root: TrieNode,
    len: usize,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name, returning the id it previously mapped to
    pub fn insert(&mut self, name: &str, id: VariableId) -> Option<VariableId> {
        let mut node = &mut self.root;
        for ch in name.chars() {
            node = node.children.entry(ch).or_default();
        }
        let previous = node.id.replace(id);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Exact-name lookup
    pub fn get(&self, name: &str) -> Option<VariableId> {
        let mut node = &self.root;
        for ch in name.chars() {
            node = node.children.get(&ch)?;
        }
        node.id
    }

    /// Longest declared name that is a prefix of `input` and whose byte
    /// length passes `accept`.
    ///
    /// Returns the variable id and the byte length of the matched name.
    pub fn longest_match_by(
        &self,
        input: &str,
        mut accept: impl FnMut(usize) -> bool,
    ) -> Option<(VariableId, usize)> {
        let mut best = self.root.id.filter(|_| accept(0)).map(|id| (id, 0));

        let mut node = &self.root;
        for (offset, ch) in input.char_indices() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(id) = node.id {
                let len = offset + ch.len_utf8();
                if accept(len) {
                    best = Some((id, len));
                }
            }
        }
        best
    }

    /// Longest declared name that is a prefix of `input`
    pub fn longest_match(&self, input: &str) -> Option<(VariableId, usize)> {
        self.longest_match_by(input, |_| true)
    }

    /// Number of distinct names in the table
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A declared variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub id: VariableId,
    pub name: String,
    pub var_type: VarType,
}

/// Variables known to the parser.
///
/// Declarations take `&mut self` and parsing takes `&self`, so every
/// declaration a parse depends on has completed before the parse starts.
/// Declaring a name twice is not rejected: the newer id replaces the older
/// one in the tables the new type touches, and tables only the old type
/// touched keep the old id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    tables: [SymbolTable; Category::COUNT],
    declarations: Vec<Declaration>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable and return its freshly assigned id
    pub fn declare(&mut self, name: &str, var_type: VarType) -> VariableId {
        // a Vec never holds more than isize::MAX items, so this cannot wrap
        let count = u64::try_from(self.declarations.len()).unwrap_or(u64::MAX - 1);
        let id = VariableId::new(count + 1);

        for category in var_type.categories() {
            self.tables[category.index()].insert(name, id);
        }
        if let Some(shadowed) = self.tables[Category::Any.index()].insert(name, id) {
            debug!(name, %shadowed, "variable redeclared");
        }

        debug!(name, %var_type, %id, "declared variable");
        self.declarations.push(Declaration {
            id,
            name: name.to_string(),
            var_type,
        });
        id
    }

    /// Table backing a grammar category
    pub fn table(&self, category: Category) -> &SymbolTable {
        &self.tables[category.index()]
    }

    /// Id currently bound to `name`
    pub fn lookup(&self, name: &str) -> Option<VariableId> {
        self.lookup_in(Category::Any, name)
    }

    /// Id bound to `name` in one category table
    pub fn lookup_in(&self, category: Category, name: &str) -> Option<VariableId> {
        self.table(category).get(name)
    }

    /// Declaration that produced `id`
    pub fn declaration(&self, id: VariableId) -> Option<&Declaration> {
        let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
        self.declarations.get(index)
    }

    /// Declared type of `id`
    pub fn type_of(&self, id: VariableId) -> Option<VarType> {
        self.declaration(id).map(|decl| decl.var_type)
    }

    /// Declared name of `id`
    pub fn name_of(&self, id: VariableId) -> Option<&str> {
        self.declaration(id).map(|decl| decl.name.as_str())
    }

    /// All declarations in order
    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    /// Number of declarations made
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Check if nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
