//! Stylesheet scoping for safe embedding within a host page.

use crate::epub::IngestOptions;
use crate::render::report::{RewriteOutcome, RewriteReport};
use cssparser::{
    AtRuleParser, CowRcStr, ParseError, Parser, ParserInput, ParserState, QualifiedRuleParser,
    SourcePosition, StyleSheetParser, Token,
};

const CHARSET: &str = "@charset";

/// The stylesheet could not be parsed into a single rule.
///
/// This failure is local: the original text is kept as-is.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("stylesheet contains no parsable rule ({invalid_rules} invalid)")]
pub struct StylesheetParseFailure {
    invalid_rules: usize,
}

impl StylesheetParseFailure {
    /// The number of rules that were rejected by the parser.
    pub fn invalid_rules(&self) -> usize {
        self.invalid_rules
    }
}

/// The result of [`CssScoper::scope`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopedStylesheet {
    /// The rewritten stylesheet, or the original text when [`Self::failure`] is set.
    pub css: String,
    /// One entry per top-level rule.
    pub report: RewriteReport,
    pub failure: Option<StylesheetParseFailure>,
}

/// Rewrites stylesheet selectors so rules only apply within the rendered
/// chapter container.
///
/// Every selector of a top-level qualified rule is:
/// 1. Stripped of the root tag selector (`body` by default), which is replaced
///    with a generic container tag (`div` by default), as the sanitizer discards
///    the root element.
/// 2. Prefixed with the scope selector (`#bw-book-content` by default).
///
/// At-rules and rules that fail to parse are passed through unscoped.
///
/// # Examples
/// ```
/// use epub_ingest::IngestOptions;
/// use epub_ingest::render::CssScoper;
///
/// let scoper = CssScoper::new(&IngestOptions::default());
///
/// assert_eq!(
///     "#bw-book-content div { color: red; }",
///     scoper.scope("body { color: red; }").css,
/// );
/// assert_eq!(
///     "#bw-book-content h1, #bw-book-content p.intro {font-weight: bold}",
///     scoper.scope("h1, p.intro {font-weight: bold}").css,
/// );
/// ```
#[derive(Clone, Debug)]
pub struct CssScoper {
    scope: String,
    root_selector: String,
    root_replacement: String,
}

impl CssScoper {
    pub fn new(options: &IngestOptions) -> Self {
        Self {
            scope: options.scope_selector.clone(),
            root_selector: options.root_selector.clone(),
            root_replacement: options.root_replacement.clone(),
        }
    }

    /// Scopes every top-level rule of `css`.
    ///
    /// Top-level rules are re-emitted one per line; comments between rules are not kept.
    /// If no rule parses at all, the original text is returned unmodified
    /// along with a [`StylesheetParseFailure`].
    pub fn scope(&self, css: &str) -> ScopedStylesheet {
        let mut rules = Vec::new();
        let mut report = RewriteReport::default();
        let mut parsed_rules = 0;
        let mut invalid_rules = 0;

        // The stylesheet parser consumes a leading `@charset` without reporting it
        let body = match split_charset(css) {
            Some((charset, rest)) => {
                log::warn!("Passing `{CHARSET}` through unscoped: at-rule");
                report.record(CHARSET, RewriteOutcome::Skipped("at-rule".to_owned()));
                rules.push(charset.to_owned());
                rest
            }
            None => css,
        };

        let mut input = ParserInput::new(body);
        let mut parser = Parser::new(&mut input);
        let mut rule_parser = RuleScoper { scoper: self };

        for result in StyleSheetParser::new(&mut parser, &mut rule_parser) {
            match result {
                Ok(rule) => {
                    parsed_rules += 1;
                    if let RewriteOutcome::Skipped(reason) = &rule.outcome {
                        log::warn!("Passing `{}` through unscoped: {reason}", rule.subject);
                    }
                    report.record(rule.subject, rule.outcome);
                    rules.push(rule.text);
                }
                Err((_, invalid)) => {
                    let invalid = invalid.trim();
                    log::warn!("Passing unparsable rule through unscoped: {invalid}");

                    invalid_rules += 1;
                    report.record(invalid, RewriteOutcome::Skipped("unparsable rule".to_owned()));
                    rules.push(invalid.to_owned());
                }
            }
        }

        if invalid_rules > 0 && parsed_rules == 0 {
            let failure = StylesheetParseFailure { invalid_rules };
            log::warn!("Keeping stylesheet unscoped: {failure}");

            return ScopedStylesheet {
                css: css.to_owned(),
                report,
                failure: Some(failure),
            };
        }

        ScopedStylesheet {
            css: rules.join("\n"),
            report,
            failure: None,
        }
    }

    fn scope_selectors<'i>(
        &self,
        input: &mut Parser<'i, '_>,
    ) -> Result<Vec<String>, ParseError<'i, ()>> {
        let mut list = SelectorList {
            selectors: Vec::new(),
            current: String::new(),
            cursor: input.position(),
        };
        self.rewrite_selectors(input, &mut list, false)?;

        list.current.push_str(input.slice_from(list.cursor));
        list.selectors.push(self.prefix(&list.current, input)?);
        Ok(list.selectors)
    }

    /// Replaces root tag selectors, descending into functional pseudo-classes
    /// such as `:not(body)`. Only top-level commas separate selectors.
    fn rewrite_selectors<'i>(
        &self,
        input: &mut Parser<'i, '_>,
        list: &mut SelectorList,
        nested: bool,
    ) -> Result<(), ParseError<'i, ()>> {
        let mut type_position = true;

        loop {
            let start = input.position();
            let lexeme = match input.next_including_whitespace_and_comments() {
                Ok(token) => Lexeme::of(token, &self.root_selector),
                Err(_) => break,
            };

            match lexeme {
                Lexeme::Root if type_position => {
                    list.current.push_str(input.slice(list.cursor..start));
                    list.current.push_str(&self.root_replacement);
                    list.cursor = input.position();
                }
                Lexeme::Comma if !nested => {
                    list.current.push_str(input.slice(list.cursor..start));
                    list.selectors.push(self.prefix(&list.current, input)?);
                    list.current.clear();
                    list.cursor = input.position();
                }
                Lexeme::Function => {
                    input.parse_nested_block(|input| self.rewrite_selectors(input, list, true))?;
                }
                _ => {}
            }
            type_position = matches!(lexeme, Lexeme::Comma | Lexeme::Combinator);
        }
        Ok(())
    }

    fn prefix<'i>(&self, selector: &str, input: &Parser<'i, '_>) -> Result<String, ParseError<'i, ()>> {
        match selector.trim() {
            "" => Err(input.new_custom_error(())),
            selector => Ok(format!("{} {selector}", self.scope)),
        }
    }
}

/// Selector text accumulated while rewriting a rule prelude.
struct SelectorList {
    selectors: Vec<String>,
    current: String,
    /// Start of the source text not yet copied into `current`.
    cursor: SourcePosition,
}

#[derive(Copy, Clone)]
enum Lexeme {
    /// An identifier matching the root tag selector.
    Root,
    Comma,
    /// Whitespace, comments, and explicit combinators.
    Combinator,
    /// The opening of a functional pseudo-class, e.g. `:not(`.
    Function,
    Other,
}

impl Lexeme {
    fn of(token: &Token<'_>, root_selector: &str) -> Self {
        match token {
            Token::Ident(name) if name.eq_ignore_ascii_case(root_selector) => Self::Root,
            Token::Comma => Self::Comma,
            Token::Function(_) => Self::Function,
            Token::WhiteSpace(_) | Token::Comment(_) | Token::Delim('>' | '+' | '~') => {
                Self::Combinator
            }
            _ => Self::Other,
        }
    }
}

struct ScopedRule {
    text: String,
    subject: String,
    outcome: RewriteOutcome,
}

struct AtRulePrelude {
    name: String,
    prelude: String,
}

impl AtRulePrelude {
    fn into_rule(self, block: Option<&str>) -> ScopedRule {
        let head = match self.prelude.as_str() {
            "" => format!("@{}", self.name),
            prelude => format!("@{} {prelude}", self.name),
        };
        let text = match block {
            Some(block) => format!("{head} {{{block}}}"),
            None => format!("{head};"),
        };

        ScopedRule {
            text,
            subject: format!("@{}", self.name),
            outcome: RewriteOutcome::Skipped("at-rule".to_owned()),
        }
    }
}

struct RuleScoper<'a> {
    scoper: &'a CssScoper,
}

impl<'i> QualifiedRuleParser<'i> for RuleScoper<'_> {
    type Prelude = Vec<String>;
    type QualifiedRule = ScopedRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        self.scoper.scope_selectors(input)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let selectors = prelude.join(", ");
        let text = format!("{selectors} {{{}}}", consume_raw(input));

        Ok(ScopedRule {
            text,
            subject: selectors,
            outcome: RewriteOutcome::Applied,
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleScoper<'_> {
    type Prelude = AtRulePrelude;
    type AtRule = ScopedRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(AtRulePrelude {
            name: name.to_string(),
            prelude: consume_raw(input).trim().to_owned(),
        })
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(prelude.into_rule(None))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Ok(prelude.into_rule(Some(consume_raw(input))))
    }
}

/// Splits a leading `@charset "...";` rule from the rest of the stylesheet.
fn split_charset(css: &str) -> Option<(&str, &str)> {
    let css = css.trim_start();

    if !css.get(..CHARSET.len())?.eq_ignore_ascii_case(CHARSET) {
        return None;
    }
    let end = css.find(';')? + 1;
    Some(css.split_at(end))
}

/// Consumes the remaining input, returning its source text.
fn consume_raw<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start)
}
