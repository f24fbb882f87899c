//! Step sentences, patterns and the step registry.
//!
//! A pattern is a sentence with `{string}` placeholders. Each placeholder
//! matches a double- or single-quoted argument and captures its contents.
//! Keywords do not take part in matching: a definition registered with
//! `Then` also answers an `And` or `When` line.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::locator::Action;
use crate::result::{E2eError, E2eResult};

/// Placeholder for a quoted string argument
const STRING_PARAM: &str = "{string}";

/// Regex for one quoted argument: two alternatives, one capture each.
/// A backslash escapes the next character inside the quotes.
const STRING_CAPTURE: &str = r#"(?:"([^"\\]*(?:\\.[^"\\]*)*)"|'([^'\\]*(?:\\.[^'\\]*)*)')"#;

/// Step keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    /// Precondition
    Given,
    /// Action
    When,
    /// Outcome
    Then,
    /// Continues the previous keyword
    And,
    /// Continues the previous keyword, negatively phrased
    But,
}

impl Keyword {
    /// Parses a keyword
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "Given" => Some(Self::Given),
            "When" => Some(Self::When),
            "Then" => Some(Self::Then),
            "And" => Some(Self::And),
            "But" => Some(Self::But),
            _ => None,
        }
    }

    /// Keyword as written
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword and its sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Keyword
    pub keyword: Keyword,
    /// Sentence after the keyword
    pub text: String,
}

impl Step {
    /// Create a step
    #[must_use]
    pub fn new(keyword: Keyword, text: impl Into<String>) -> Self {
        Self {
            keyword,
            text: text.into(),
        }
    }

    /// Parses a line such as `When User Clicks the Signup Link`
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::MissingKeyword`] if the line has no leading keyword
    pub fn parse(line: &str) -> E2eResult<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let keyword = Keyword::parse(word).ok_or_else(|| E2eError::MissingKeyword {
            line: line.to_string(),
        })?;
        Ok(Self::new(keyword, rest.trim()))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.text)
    }
}

/// A compiled step pattern
#[derive(Debug, Clone)]
pub struct StepPattern {
    source: String,
    regex: Regex,
    arity: usize,
}

impl StepPattern {
    /// Compiles a pattern
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::InvalidPattern`] for empty patterns or
    /// unsupported `{...}` parameter types
    pub fn parse(source: &str) -> E2eResult<Self> {
        let invalid = |message: &str| E2eError::InvalidPattern {
            pattern: source.to_string(),
            message: message.to_string(),
        };
        if source.trim().is_empty() {
            return Err(invalid("pattern is empty"));
        }

        let mut expr = String::from("^");
        let mut arity = 0;
        for (i, literal) in source.split(STRING_PARAM).enumerate() {
            if i > 0 {
                expr.push_str(STRING_CAPTURE);
                arity += 1;
            }
            if literal.contains('{') || literal.contains('}') {
                return Err(invalid("only {string} parameters are supported"));
            }
            expr.push_str(&regex::escape(literal));
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            regex,
            arity,
        })
    }

    /// Pattern as written
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of `{string}` parameters
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Captured arguments if `text` matches
    #[must_use]
    pub fn captures(&self, text: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(text.trim())?;
        let args = (0..self.arity)
            .map(|i| {
                if let Some(m) = caps.get(2 * i + 1) {
                    m.as_str().replace("\\\"", "\"")
                } else if let Some(m) = caps.get(2 * i + 2) {
                    m.as_str().replace("\\'", "'")
                } else {
                    String::new()
                }
            })
            .collect();
        Some(args)
    }
}

/// Builds the action plan of a step from its captured arguments
pub type PlanFn = fn(&[String]) -> Vec<Action>;

/// A registered step definition
#[derive(Debug, Clone)]
pub struct StepDefinition {
    /// Keyword it was registered with
    pub keyword: Keyword,
    /// Compiled pattern
    pub pattern: StepPattern,
    plan: PlanFn,
}

impl StepDefinition {
    /// Action plan for `args`
    #[must_use]
    pub fn plan(&self, args: &[String]) -> Vec<Action> {
        (self.plan)(args)
    }
}

/// A step resolved against the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStep {
    /// The step as written
    pub step: Step,
    /// Pattern that matched
    pub pattern: String,
    /// Captured arguments
    pub args: Vec<String>,
    /// Actions to execute
    pub actions: Vec<Action>,
}

/// Registry of step definitions
#[derive(Debug, Default)]
pub struct StepRegistry {
    definitions: Vec<StepDefinition>,
}

impl StepRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is invalid or already registered
    pub fn register(&mut self, keyword: Keyword, pattern: &str, plan: PlanFn) -> E2eResult<()> {
        if self.definitions.iter().any(|d| d.pattern.source() == pattern) {
            return Err(E2eError::DuplicateStep {
                pattern: pattern.to_string(),
            });
        }
        let pattern = StepPattern::parse(pattern)?;
        self.definitions.push(StepDefinition {
            keyword,
            pattern,
            plan,
        });
        Ok(())
    }

    /// Registers a `Given` definition
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::register`]
    pub fn given(&mut self, pattern: &str, plan: PlanFn) -> E2eResult<()> {
        self.register(Keyword::Given, pattern, plan)
    }

    /// Registers a `When` definition
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::register`]
    pub fn when(&mut self, pattern: &str, plan: PlanFn) -> E2eResult<()> {
        self.register(Keyword::When, pattern, plan)
    }

    /// Registers a `Then` definition
    ///
    /// # Errors
    ///
    /// See [`StepRegistry::register`]
    pub fn then(&mut self, pattern: &str, plan: PlanFn) -> E2eResult<()> {
        self.register(Keyword::Then, pattern, plan)
    }

    /// Number of definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether no definitions are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered definitions
    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// Resolves `step` to exactly one definition and builds its plan
    ///
    /// # Errors
    ///
    /// Returns [`E2eError::UndefinedStep`] or [`E2eError::AmbiguousStep`]
    pub fn resolve(&self, step: &Step) -> E2eResult<ResolvedStep> {
        let mut matches = self
            .definitions
            .iter()
            .filter_map(|d| d.pattern.captures(&step.text).map(|args| (d, args)));

        let Some((definition, args)) = matches.next() else {
            return Err(E2eError::UndefinedStep {
                text: step.text.clone(),
            });
        };

        let others: Vec<String> = matches.map(|(d, _)| d.pattern.source().to_string()).collect();
        if !others.is_empty() {
            let mut patterns = vec![definition.pattern.source().to_string()];
            patterns.extend(others);
            return Err(E2eError::AmbiguousStep {
                text: step.text.clone(),
                patterns,
            });
        }

        Ok(ResolvedStep {
            step: step.clone(),
            pattern: definition.pattern.source().to_string(),
            actions: definition.plan(&args),
            args,
        })
    }
}
