//! The member registry shared by every assertion of an engine.
//!
//! Members are installed by name and replaced in place. Lookups clone the
//! member out, so no lock is held while assertion code runs and members may
//! freely invoke other members.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::assertion::Assertion;
use crate::guard::add_length_guard;
use crate::member::{Member, MemberId, MethodFn, MethodResult, Outcome, Property, PropertyFn};
use crate::overwrite::{
    claim_stack_origin, empty_getter, make_override, make_property_override, not_a_function,
    DefaultValueFn, MethodFactory, PropertyFactory,
};
use crate::value::Value;

/// Edit distance at or above which no suggestion is offered.
const SUGGESTION_DISTANCE_CAP: usize = 4;

/// Default value used by added members: a new assertion carrying every flag.
#[must_use]
pub fn chain_default() -> DefaultValueFn {
    Arc::new(|assertion: &Assertion| Outcome::Chain(Box::new(assertion.chained())))
}

/// Named members available to assertions.
#[derive(Debug, Default)]
pub struct Prototype {
    members: RwLock<BTreeMap<String, Member>>,
}

impl Prototype {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the member installed under `name`.
    pub fn get(&self, name: &str) -> Option<Member> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Installed member names, in order.
    pub fn names(&self) -> Vec<String> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    fn install(&self, member: Member) -> MemberId {
        let id = member.id();
        let name = member.name().to_string();
        self.members
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, member);
        id
    }

    /// Adds a method. When `func` returns nothing, the call yields a new
    /// assertion carrying every flag so the chain can continue.
    pub fn add_method<F>(&self, name: &str, arity: usize, func: F) -> MemberId
    where
        F: Fn(&mut Assertion, &[Value]) -> MethodResult + Send + Sync + 'static,
    {
        let id = MemberId::new();
        let owned = name.to_string();
        let default = chain_default();
        let wrapper: MethodFn = Arc::new(move |assertion: &mut Assertion, args: &[Value]| -> MethodResult {
            claim_stack_origin(assertion, id, &owned);
            if let Some(outcome) = func(assertion, args)? {
                return Ok(Some(outcome));
            }
            Ok(Some(default(assertion)))
        });

        log::debug!("adding method `{name}` (arity {arity})");
        self.install(Member::Method(add_length_guard(id, name, arity, wrapper)))
    }

    /// Adds a property. When `getter` returns nothing, the access yields a
    /// new assertion carrying every flag.
    pub fn add_property<F>(&self, name: &str, getter: F) -> MemberId
    where
        F: Fn(&mut Assertion) -> MethodResult + Send + Sync + 'static,
    {
        let id = MemberId::new();
        let owned = name.to_string();
        let default = chain_default();
        let wrapper: PropertyFn = Arc::new(move |assertion: &mut Assertion| -> MethodResult {
            claim_stack_origin(assertion, id, &owned);
            if let Some(outcome) = getter(assertion)? {
                return Ok(Some(outcome));
            }
            Ok(Some(default(assertion)))
        });

        log::debug!("adding property `{name}`");
        self.install(Member::Property(Property::new(id, name.to_string(), wrapper)))
    }

    /// Replaces the method `name` with `factory(previous)`.
    ///
    /// If `name` holds no method, the previous implementation handed to the
    /// factory fails with "`name` is not a function" when invoked. The new
    /// wrapper keeps the arity of the method it replaced.
    pub fn overwrite_method<F>(
        &self,
        name: &str,
        factory: F,
        create_default_value: Option<DefaultValueFn>,
    ) -> MemberId
    where
        F: Fn(MethodFn) -> MethodFn + Send + Sync + 'static,
    {
        let (previous, arity) = match self.get(name) {
            Some(Member::Method(method)) => {
                let arity = method.arity();
                let guarded: MethodFn = Arc::new(move |assertion: &mut Assertion, args: &[Value]| {
                    method.call(assertion, args)
                });
                (guarded, arity)
            }
            Some(Member::Property(_)) => {
                log::warn!("overwriting property `{name}` as a method; previous implementation is not callable");
                (not_a_function(name), 0)
            }
            None => (not_a_function(name), 0),
        };

        let id = MemberId::new();
        let factory: MethodFactory = Arc::new(factory);
        let wrapper = make_override(id, name, previous, factory, create_default_value);

        log::debug!("overwriting method `{name}` (arity {arity})");
        self.install(Member::Method(add_length_guard(id, name, arity, wrapper)))
    }

    /// Replaces the property `name` with `factory(previous)`.
    ///
    /// If `name` holds no property, the previous getter returns nothing.
    pub fn overwrite_property<F>(
        &self,
        name: &str,
        factory: F,
        create_default_value: Option<DefaultValueFn>,
    ) -> MemberId
    where
        F: Fn(PropertyFn) -> PropertyFn + Send + Sync + 'static,
    {
        let previous = match self.get(name) {
            Some(Member::Property(property)) => property.getter(),
            Some(Member::Method(_)) => {
                log::warn!("overwriting method `{name}` as a property; previous getter yields nothing");
                empty_getter()
            }
            None => empty_getter(),
        };

        let id = MemberId::new();
        let factory: PropertyFactory = Arc::new(factory);
        let getter = make_property_override(id, name, previous, factory, create_default_value);

        log::debug!("overwriting property `{name}`");
        self.install(Member::Property(Property::new(id, name.to_string(), getter)))
    }

    /// Closest installed name to `name`, if any is within the suggestion cap.
    pub fn suggest(&self, name: &str) -> Option<String> {
        let members = self.members.read().unwrap_or_else(PoisonError::into_inner);
        let mut best: Option<(&String, usize)> = None;
        for candidate in members.keys() {
            let cap = best.map_or(SUGGESTION_DISTANCE_CAP, |(_, d)| d);
            let distance = string_distance_capped(name, candidate, cap);
            if distance < cap {
                best = Some((candidate, distance));
            }
        }
        best.map(|(candidate, _)| candidate.clone())
    }
}

/// Levenshtein distance between `a` and `b`, or `cap` if it is at least `cap`.
#[must_use]
pub fn string_distance_capped(a: &str, b: &str, cap: usize) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) >= cap {
        return cap;
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];
        for (j, cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
            row_min = row_min.min(row[j + 1]);
        }
        if row_min >= cap {
            return cap;
        }
    }
    row[b.len()].min(cap)
}
