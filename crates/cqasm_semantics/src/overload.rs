// Copyright contributors to the openqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Generic overload resolution.
//
// An `OverloadedNameResolver<T>` maps names to lists of overloads. Each overload
// pairs a tag of type `T` (an instruction, a native function, ...) with a list
// of formal parameter types. Resolution picks the first overload, in insertion
// order, whose parameters accept the arguments after promotion. There is no
// notion of "most specific": callers register narrower overloads first.

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::semantic_error::{SemanticError, SemanticResult};
use crate::types::{display_types, Type, Types};
use crate::values::{promote, types_of, Value, Values};

/// How a table compares names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    /// The key under which `name` is stored.
    pub fn key(&self, name: &str) -> SmolStr {
        match self {
            CaseSensitivity::Sensitive => SmolStr::new(name),
            CaseSensitivity::Insensitive => SmolStr::new(name.to_ascii_lowercase()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Overload<T> {
    tag: T,
    param_types: Types,
}

impl<T> Overload<T> {
    pub fn new(tag: T, param_types: Types) -> Overload<T> {
        Overload { tag, param_types }
    }

    pub fn tag(&self) -> &T {
        &self.tag
    }

    pub fn param_types(&self) -> &[Type] {
        &self.param_types
    }

    pub fn num_params(&self) -> usize {
        self.param_types.len()
    }

    /// Promote every argument to the corresponding parameter type.
    /// `None` if the count differs or any promotion fails.
    pub fn promote_args(&self, args: &[Value]) -> Option<Values> {
        if args.len() != self.num_params() {
            return None;
        }
        let promoted = args
            .iter()
            .zip(self.param_types.iter())
            .map(|(arg, typ)| promote(arg, typ))
            .collect::<Option<Vec<_>>>()?;
        Some(promoted.into_iter().map(|v| v.into_owned()).collect())
    }
}

/// The overloads registered for a single name.
#[derive(Clone, Debug)]
pub struct OverloadResolver<T> {
    overloads: Vec<Overload<T>>,
}

impl<T> Default for OverloadResolver<T> {
    fn default() -> Self {
        OverloadResolver {
            overloads: Vec::new(),
        }
    }
}

impl<T> OverloadResolver<T> {
    /// Appends an overload. Identical signatures are allowed; the later one is
    /// never selected.
    pub fn add_overload(&mut self, tag: T, param_types: Types) {
        self.overloads.push(Overload::new(tag, param_types));
    }

    /// First overload accepting `args`, with the promoted arguments.
    pub fn resolve(&self, args: &[Value]) -> Option<(&T, Values)> {
        self.overloads.iter().find_map(|overload| {
            overload
                .promote_args(args)
                .map(|promoted| (overload.tag(), promoted))
        })
    }

    pub fn overloads(&self) -> &[Overload<T>] {
        &self.overloads
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    // Spelling used at first registration, for messages and listings.
    name: SmolStr,
    resolver: OverloadResolver<T>,
}

/// Name to overloads table with a per-table case sensitivity policy.
#[derive(Clone, Debug)]
pub struct OverloadedNameResolver<T> {
    case_sensitivity: CaseSensitivity,
    table: IndexMap<SmolStr, Entry<T>>,
}

impl<T> Default for OverloadedNameResolver<T> {
    fn default() -> Self {
        OverloadedNameResolver::new(CaseSensitivity::default())
    }
}

impl<T> OverloadedNameResolver<T> {
    pub fn new(case_sensitivity: CaseSensitivity) -> OverloadedNameResolver<T> {
        OverloadedNameResolver {
            case_sensitivity,
            table: IndexMap::new(),
        }
    }

    pub fn case_sensitivity(&self) -> CaseSensitivity {
        self.case_sensitivity
    }

    pub fn add_overload(&mut self, name: &str, tag: T, param_types: Types) {
        self.table
            .entry(self.case_sensitivity.key(name))
            .or_insert_with(|| Entry {
                name: SmolStr::new(name),
                resolver: OverloadResolver::default(),
            })
            .resolver
            .add_overload(tag, param_types);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(&self.case_sensitivity.key(name))
    }

    /// Resolve `name` against `args`.
    ///
    /// Fails with `NameResolutionFailure` if the name is unknown and with
    /// `OverloadResolutionFailure` if no overload accepts the arguments.
    pub fn resolve(&self, name: &str, args: &[Value]) -> SemanticResult<(&T, Values)> {
        log::trace!("resolving '{name}' with {} argument(s)", args.len());
        let entry = self
            .table
            .get(&self.case_sensitivity.key(name))
            .ok_or_else(|| SemanticError::name_resolution(format!("failed to resolve '{name}'")))?;
        entry.resolver.resolve(args).ok_or_else(|| {
            SemanticError::overload_resolution(format!(
                "failed to resolve overload for '{}' with argument pack ({})",
                name,
                display_types(&types_of(args))
            ))
        })
    }

    /// Registered names, in registration order, with their overloads.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &[Overload<T>])> {
        self.table
            .values()
            .map(|entry| (&entry.name, entry.resolver.overloads()))
    }
}
