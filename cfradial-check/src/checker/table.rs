//! Expectation tables.
//!
//! A table holds named rules in document order. Checking walks the required
//! rules first and then the optional ones, reporting each failing property
//! of a present item separately.

use crate::checker::expect::{format_dims, AttributeExpectation, VariableExpectation};
use crate::dataset::{AttributeSource, DataType, Dataset};
use crate::diagnostics::{Category, Diagnostics};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// A named expectation and whether the item must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<E> {
    pub name: &'static str,
    pub presence: Presence,
    pub expect: E,
}

pub type AttributeRule = Rule<AttributeExpectation>;
pub type VariableRule = Rule<VariableExpectation>;

impl<E> Rule<E> {
    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }
}

impl AttributeRule {
    pub const fn required(name: &'static str) -> Self {
        Self::with_presence(name, Presence::Required)
    }

    pub const fn optional(name: &'static str) -> Self {
        Self::with_presence(name, Presence::Optional)
    }

    const fn with_presence(name: &'static str, presence: Presence) -> Self {
        Rule {
            name,
            presence,
            expect: AttributeExpectation {
                dtype: None,
                value: None,
            },
        }
    }

    pub const fn dtype(self, dtype: DataType) -> Self {
        Rule {
            expect: AttributeExpectation {
                dtype: Some(dtype),
                value: self.expect.value,
            },
            ..self
        }
    }

    pub const fn value(self, value: &'static str) -> Self {
        Rule {
            expect: AttributeExpectation {
                dtype: self.expect.dtype,
                value: Some(value),
            },
            ..self
        }
    }
}

impl VariableRule {
    pub const fn required(name: &'static str) -> Self {
        Self::with_presence(name, Presence::Required)
    }

    pub const fn optional(name: &'static str) -> Self {
        Self::with_presence(name, Presence::Optional)
    }

    const fn with_presence(name: &'static str, presence: Presence) -> Self {
        Rule {
            name,
            presence,
            expect: VariableExpectation {
                dtype: None,
                dims: None,
                units: None,
            },
        }
    }

    pub const fn dtype(self, dtype: DataType) -> Self {
        Rule {
            expect: VariableExpectation {
                dtype: Some(dtype),
                ..self.expect
            },
            ..self
        }
    }

    pub const fn dims(self, dims: &'static [&'static str]) -> Self {
        Rule {
            expect: VariableExpectation {
                dims: Some(dims),
                ..self.expect
            },
            ..self
        }
    }

    pub const fn units(self, units: &'static str) -> Self {
        Rule {
            expect: VariableExpectation {
                units: Some(units),
                ..self.expect
            },
            ..self
        }
    }
}

/// Rules for one clause, with the noun phrase used in its messages
/// (`global attribute`, `sweep variable`, ...).
#[derive(Debug, Clone)]
pub struct ExpectationTable<E> {
    text: String,
    section: &'static str,
    rules: Vec<Rule<E>>,
}

pub type AttributeTable = ExpectationTable<AttributeExpectation>;
pub type VariableTable = ExpectationTable<VariableExpectation>;

impl<E: Copy> ExpectationTable<E> {
    pub fn new(text: impl Into<String>, section: &'static str) -> Self {
        Self {
            text: text.into(),
            section,
            rules: Vec::new(),
        }
    }

    pub fn with_rules(mut self, rules: &[Rule<E>]) -> Self {
        for rule in rules {
            self.add(*rule);
        }
        self
    }

    /// Register a rule. A name may only be registered once; in release
    /// builds a repeated name replaces the earlier rule in place.
    pub fn add(&mut self, rule: Rule<E>) {
        if let Some(existing) = self.rules.iter_mut().find(|r| r.name == rule.name) {
            debug_assert!(
                false,
                "rule '{}' registered twice in {} table",
                rule.name, self.text
            );
            *existing = rule;
            return;
        }
        self.rules.push(rule);
    }

    pub fn rule(&self, name: &str) -> Option<&Rule<E>> {
        self.rules.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in check order: required first, then optional.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.check_order().map(|r| r.name)
    }

    fn check_order(&self) -> impl Iterator<Item = &Rule<E>> + '_ {
        let required = self.rules.iter().filter(|r| r.is_required());
        let optional = self.rules.iter().filter(|r| !r.is_required());
        required.chain(optional)
    }

    fn report_missing(&self, rule: &Rule<E>, diag: &mut Diagnostics) {
        match rule.presence {
            Presence::Required => diag.error(
                self.section,
                Category::MissingRequired,
                format!("Required {} '{}' missing.", self.text, rule.name),
            ),
            Presence::Optional => diag.note(
                self.section,
                format!("Optional {} '{}' missing.", self.text, rule.name),
            ),
        }
    }
}

impl AttributeTable {
    /// Check the attributes of a dataset (global attributes) or a variable.
    pub fn check<S: AttributeSource + ?Sized>(&self, source: &S, diag: &mut Diagnostics) {
        for rule in self.check_order() {
            let Some(value) = source.attribute(rule.name) else {
                self.report_missing(rule, diag);
                continue;
            };
            let expect = &rule.expect;

            if let Some(expected) = expect.dtype {
                if expect.type_bad(value.dtype()) {
                    diag.error(
                        self.section,
                        Category::TypeMismatch,
                        format!(
                            "{} '{}' has incorrect type: {} should be {}.",
                            self.text,
                            rule.name,
                            value.dtype(),
                            expected
                        ),
                    );
                }
            }

            if let Some(expected) = expect.value {
                if expect.value_bad(value) {
                    diag.error(
                        self.section,
                        Category::ValueMismatch,
                        format!(
                            "{} '{}' has incorrect value: {} should be {}.",
                            self.text, rule.name, value, expected
                        ),
                    );
                }
            }
        }
    }
}

impl VariableTable {
    pub fn check(&self, dataset: &Dataset, diag: &mut Diagnostics) {
        for rule in self.check_order() {
            let Some(var) = dataset.variable(rule.name) else {
                self.report_missing(rule, diag);
                continue;
            };
            let expect = &rule.expect;

            if let Some(expected) = expect.dtype {
                if expect.dtype_bad(var.dtype) {
                    diag.error(
                        self.section,
                        Category::TypeMismatch,
                        format!(
                            "{} '{}' has incorrect type: {} should be {}",
                            self.text, rule.name, var.dtype, expected
                        ),
                    );
                }
            }

            if let Some(expected) = expect.dims {
                if expect.dims_bad(&var.dimensions) {
                    diag.error(
                        self.section,
                        Category::ShapeMismatch,
                        format!(
                            "{} '{}' has incorrect dimensions: {} should be {}",
                            self.text,
                            rule.name,
                            format_dims(&var.dimensions),
                            format_dims(expected)
                        ),
                    );
                }
            }

            let Some(expected) = expect.units else {
                continue;
            };
            match var.attribute("units") {
                None => diag.error(
                    self.section,
                    Category::UnitsMismatch,
                    format!("{} '{}' is missing a unit attribute.", self.text, rule.name),
                ),
                Some(units) if expect.units_bad(units) => diag.error(
                    self.section,
                    Category::UnitsMismatch,
                    format!(
                        "{} '{}' has incorrect units: {} should be {}",
                        self.text, rule.name, units, expected
                    ),
                ),
                Some(_) => {}
            }
        }
    }
}
