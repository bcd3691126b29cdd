//! Translation of equation lines into [`Expr`] fragments.
//!
//! Two grammars share one entry point:
//!
//! - [`Grammar::Permissive`] accepts any combination of the operators `!`,
//!   `*`, `+`, `-`, `=`, parentheses and the constants `0`/`1`. Binding
//!   strength, tightest first: `=` and `-`, then `!`, `*`, `+`. A run of
//!   `=`/`-` chains pairwise, so `a - b = c` means `(a - b) * (b = c)`,
//!   and `!a = b` negates the whole comparison.
//! - [`Grammar::Strict`] accepts a fixed set of line shapes, tried in order:
//!   1. `VAR-(L1+L2+...)`
//!   2. `(L1*L2*...)=VAR`
//!   3. `!VAR`
//!   4. `L1+L2+...`
//!   5. `L1*L2*...`
//!   6. `VAR1=VAR2`
//!   7. `VAR`
//!
//!   where each `Li` is a variable, optionally negated with `!`. A trailing
//!   `= 1` is stripped first, along with any parentheses wrapping the whole
//!   remaining line.
//!
//! Every identifier in a line is checked against the declared variables
//! before the line is parsed.

use crate::error::{SolveError, SolveResult};
use crate::logic::expr::{Expr, ands, ors};
use crate::logic::formula::{Equation, Formula};
use crate::logic::lexer::{self, Token};
use crate::system::variable::{VariableSet, is_valid_name};
use clap::ValueEnum;
use log::debug;
use std::fmt::{self, Display};
use std::iter::Peekable;
use std::vec::IntoIter;

/// Which line grammar the translator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Grammar {
    /// Free-form operator expressions; paired with exhaustive search.
    #[default]
    Permissive,
    /// The seven recognised line shapes; paired with the SAT backend.
    Strict,
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// Turns equation text into a [`Formula`] over a fixed [`VariableSet`].
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    variables: &'a VariableSet,
    grammar: Grammar,
}

impl<'a> Translator<'a> {
    /// A translator binding names from `variables` and parsing with `grammar`.
    #[must_use]
    pub const fn new(variables: &'a VariableSet, grammar: Grammar) -> Self {
        Self { variables, grammar }
    }

    /// The grammar lines are parsed with.
    #[must_use]
    pub const fn grammar(&self) -> Grammar {
        self.grammar
    }

    /// Translates newline-separated equations; blank lines are skipped.
    ///
    /// Stops at the first offending line.
    ///
    /// # Errors
    ///
    /// `NoVariables`, `NoEquations`, or the first line error from
    /// [`Translator::translate_line`].
    pub fn translate(&self, text: &str) -> SolveResult<Formula> {
        if self.variables.is_empty() {
            return Err(SolveError::NoVariables);
        }

        let lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        if lines.is_empty() {
            return Err(SolveError::NoEquations);
        }

        let equations = lines
            .into_iter()
            .map(|line| {
                self.translate_line(line).map(|fragment| Equation {
                    raw: line.to_string(),
                    fragment,
                })
            })
            .collect::<SolveResult<Vec<_>>>()?;

        let formula = Formula::new(equations, self.variables.len());
        debug!(
            "translated {} equation(s) with {:?} grammar: {}",
            formula.equations().len(),
            self.grammar,
            formula.render(self.variables)
        );
        Ok(formula)
    }

    /// Translates one trimmed, non-empty equation line.
    ///
    /// # Errors
    ///
    /// `UnknownVariable` if the line names undeclared variables,
    /// `Syntax` for malformed permissive lines, `UnsupportedFormat` for
    /// strict lines matching none of the recognised shapes.
    pub fn translate_line(&self, line: &str) -> SolveResult<Expr> {
        self.check_names(line)?;
        match self.grammar {
            Grammar::Permissive => self.parse_permissive(line),
            Grammar::Strict => self.parse_strict(line),
        }
    }

    fn check_names(&self, line: &str) -> SolveResult<()> {
        let unknown = lexer::identifiers(line)
            .into_iter()
            .filter(|name| self.variables.index_of(name).is_none())
            .collect::<Vec<_>>();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(SolveError::UnknownVariable {
                names: unknown,
                line: line.to_string(),
            })
        }
    }

    fn var(&self, name: &str, line: &str) -> SolveResult<usize> {
        self.variables
            .index_of(name)
            .ok_or_else(|| SolveError::UnknownVariable {
                names: vec![name.to_string()],
                line: line.to_string(),
            })
    }

    fn parse_permissive(&self, line: &str) -> SolveResult<Expr> {
        let tokens = lexer::tokenize(line).map_err(|e| SolveError::Syntax {
            line: line.to_string(),
            message: format!("unexpected character `{}`", e.found),
        })?;
        let mut parser = Parser {
            tokens: tokens.into_iter().peekable(),
            translator: self,
            line,
        };
        let expr = parser.disjunction()?;
        match parser.tokens.next() {
            None => Ok(expr),
            Some(token) => Err(parser.syntax(format!("unexpected `{token}`"))),
        }
    }

    fn parse_strict(&self, line: &str) -> SolveResult<Expr> {
        let unsupported = || SolveError::UnsupportedFormat {
            line: line.to_string(),
        };

        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let mut body = compact.as_str();
        if let Some(stripped) = body.strip_suffix("=1") {
            body = strip_wrapping_parens(stripped);
        }
        if body.is_empty() {
            return Err(unsupported());
        }

        // VAR-(L1+L2+...)
        if let Some((head, tail)) = body.split_once('-') {
            let inner = tail
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .ok_or_else(unsupported)?;
            if !is_valid_name(head) {
                return Err(unsupported());
            }
            let premise = Expr::Var(self.var(head, line)?);
            let options = self.literals(inner, '+', line)?.ok_or_else(unsupported)?;
            return Ok(Expr::implies(premise, ors(options)));
        }

        // (L1*L2*...)=VAR
        if let Some(rest) = body.strip_prefix('(') {
            let (inner, target) = rest.split_once(")=").ok_or_else(unsupported)?;
            if !is_valid_name(target) {
                return Err(unsupported());
            }
            let factors = self.literals(inner, '*', line)?.ok_or_else(unsupported)?;
            return Ok(Expr::iff(ands(factors), Expr::Var(self.var(target, line)?)));
        }

        // !VAR
        if let Some(name) = body.strip_prefix('!') {
            if is_valid_name(name) {
                return Ok(Expr::negate(Expr::Var(self.var(name, line)?)));
            }
        }

        let has = |ops: &[char]| body.contains(ops);

        // L1+L2+...
        if body.contains('+') && !has(&['*', '=', '-', '(', ')'][..]) {
            if let Some(options) = self.literals(body, '+', line)? {
                return Ok(Expr::Or(options));
            }
        }

        // L1*L2*...
        if body.contains('*') && !has(&['+', '=', '-', '(', ')'][..]) {
            if let Some(factors) = self.literals(body, '*', line)? {
                return Ok(Expr::And(factors));
            }
        }

        // VAR1=VAR2
        if let Some((left, right)) = body.split_once('=') {
            if is_valid_name(left) && is_valid_name(right) {
                return Ok(Expr::iff(
                    Expr::Var(self.var(left, line)?),
                    Expr::Var(self.var(right, line)?),
                ));
            }
        }

        // VAR
        if is_valid_name(body) {
            return Ok(Expr::Var(self.var(body, line)?));
        }

        Err(unsupported())
    }

    /// Splits `text` on `sep` into optionally negated variables, or `None`
    /// if any piece is not of that form.
    fn literals(&self, text: &str, sep: char, line: &str) -> SolveResult<Option<Vec<Expr>>> {
        let mut out = Vec::new();
        for piece in text.split(sep) {
            let (name, polarity) = match piece.strip_prefix('!') {
                Some(name) => (name, false),
                None => (piece, true),
            };
            if !is_valid_name(name) {
                return Ok(None);
            }
            out.push(Expr::literal(self.var(name, line)?, polarity));
        }
        Ok(Some(out))
    }
}

/// Removes one pair of parentheses if it encloses all of `text`.
fn strip_wrapping_parens(text: &str) -> &str {
    let Some(inner) = text.strip_prefix('(').and_then(|t| t.strip_suffix(')')) else {
        return text;
    };
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return text;
                }
            }
            _ => {}
        }
    }
    if depth == 0 { inner } else { text }
}

/// Recursive-descent parser for the permissive grammar.
struct Parser<'t, 'a> {
    tokens: Peekable<IntoIter<Token>>,
    translator: &'t Translator<'a>,
    line: &'t str,
}

impl Parser<'_, '_> {
    fn syntax(&self, message: String) -> SolveError {
        SolveError::Syntax {
            line: self.line.to_string(),
            message,
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.tokens.peek() == Some(token) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn disjunction(&mut self) -> SolveResult<Expr> {
        let mut terms = vec![self.conjunction()?];
        while self.eat(&Token::Or) {
            terms.push(self.conjunction()?);
        }
        Ok(ors(terms))
    }

    fn conjunction(&mut self) -> SolveResult<Expr> {
        let mut factors = vec![self.negation()?];
        while self.eat(&Token::And) {
            factors.push(self.negation()?);
        }
        Ok(ands(factors))
    }

    /// A leading `!` covers the whole comparison chain after it.
    fn negation(&mut self) -> SolveResult<Expr> {
        if self.eat(&Token::Not) {
            return Ok(Expr::negate(self.negation()?));
        }
        self.comparison()
    }

    /// `a - b = c` holds when every adjacent pair holds: `(a - b) * (b = c)`.
    fn comparison(&mut self) -> SolveResult<Expr> {
        let mut left = self.operand()?;
        let mut links = Vec::new();
        loop {
            let link: fn(Expr, Expr) -> Expr = if self.eat(&Token::Eq) {
                Expr::iff
            } else if self.eat(&Token::Implies) {
                Expr::implies
            } else {
                break;
            };
            let right = self.operand()?;
            links.push(link(left, right.clone()));
            left = right;
        }
        Ok(if links.is_empty() { left } else { ands(links) })
    }

    /// A `!` right after `=` or `-` negates only the next operand.
    fn operand(&mut self) -> SolveResult<Expr> {
        if self.eat(&Token::Not) {
            return Ok(Expr::negate(self.operand()?));
        }
        self.primary()
    }

    fn primary(&mut self) -> SolveResult<Expr> {
        match self.tokens.next() {
            Some(Token::Ident(name)) => Ok(Expr::Var(self.translator.var(&name, self.line)?)),
            Some(Token::Const(b)) => Ok(Expr::Const(b)),
            Some(Token::LParen) => {
                let inner = self.disjunction()?;
                if self.eat(&Token::RParen) {
                    Ok(inner)
                } else {
                    Err(self.syntax("missing `)`".to_string()))
                }
            }
            Some(token) => Err(self.syntax(format!("unexpected `{token}`"))),
            None => Err(self.syntax("unexpected end of equation".to_string())),
        }
    }
}
