//! Placeholder substitution for path and file name patterns.
//!
//! A pattern is literal text with `{Dotted.Path}` placeholders. `{{` and `}}`
//! produce literal braces. Paths are looked up in a fixed table of accessors
//! rather than discovered at runtime, so the full set of supported names is
//! known up front and can be listed with [`placeholders`].
//!
//! Roots:
//! - `Now.…` and `WeekCommencing.…` select a date branch explicitly.
//! - A bare date path (`Year.…`, `Month.…`, `Day.…`) reads from `Now`.
//! - `EntryID`, `FileExtension` and `Topic` read the entry metadata.

use crate::errors::TemplateSyntaxError;
use crate::templating::context::TemplateContext;
use crate::templating::model::DateModel;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

type DateField = fn(&DateModel) -> String;

/// Every path that can follow a branch root, in listing order.
const DATE_FIELDS: &[(&str, DateField)] = &[
    ("Year.Num", |m| m.year.num.to_string()),
    ("Year.Short", |m| m.year.short.clone()),
    ("Year.IsoYear", |m| m.year.iso_year.to_string()),
    ("Year.DaysIn", |m| m.year.days_in.to_string()),
    ("Year.Month.Num", |m| m.year.month.num.to_string()),
    ("Year.Month.Pad", |m| m.year.month.pad.clone()),
    ("Year.Month.Ord", |m| m.year.month.ord.clone()),
    ("Year.Month.Name", |m| m.year.month.name.clone()),
    ("Year.Month.Short", |m| m.year.month.short.clone()),
    ("Year.Month.DaysIn", |m| m.year.month.days_in.to_string()),
    ("Year.Month.Day.Num", |m| m.year.month.day.num.to_string()),
    ("Year.Month.Day.Pad", |m| m.year.month.day.pad.clone()),
    ("Year.Month.Day.Ord", |m| m.year.month.day.ord.clone()),
    ("Year.Month.Week.Num", |m| m.year.month.week.num.to_string()),
    ("Year.Month.Week.Pad", |m| m.year.month.week.pad.clone()),
    ("Year.Month.Week.Ord", |m| m.year.month.week.ord.clone()),
    ("Year.Month.Week.Day.Num", |m| m.year.month.week.day.num.to_string()),
    ("Year.Month.Week.Day.Pad", |m| m.year.month.week.day.pad.clone()),
    ("Year.Month.Week.Day.Ord", |m| m.year.month.week.day.ord.clone()),
    ("Year.Month.Week.Day.Name", |m| m.year.month.week.day.name.clone()),
    ("Year.Month.Week.Day.Short", |m| m.year.month.week.day.short.clone()),
    ("Year.Week.Num", |m| m.year.week.num.to_string()),
    ("Year.Week.Pad", |m| m.year.week.pad.clone()),
    ("Year.Week.Ord", |m| m.year.week.ord.clone()),
    ("Year.Week.Day.Num", |m| m.year.week.day.num.to_string()),
    ("Year.Week.Day.Pad", |m| m.year.week.day.pad.clone()),
    ("Year.Week.Day.Ord", |m| m.year.week.day.ord.clone()),
    ("Year.Week.Day.Name", |m| m.year.week.day.name.clone()),
    ("Year.Week.Day.Short", |m| m.year.week.day.short.clone()),
    ("Year.Day.Num", |m| m.year.day.num.to_string()),
    ("Year.Day.Pad", |m| m.year.day.pad.clone()),
    ("Year.Day.Ord", |m| m.year.day.ord.clone()),
    ("Month.Num", |m| m.month.num.to_string()),
    ("Month.Pad", |m| m.month.pad.clone()),
    ("Month.Ord", |m| m.month.ord.clone()),
    ("Month.Name", |m| m.month.name.clone()),
    ("Month.Short", |m| m.month.short.clone()),
    ("Month.DaysIn", |m| m.month.days_in.to_string()),
    ("Month.Day.Num", |m| m.month.day.num.to_string()),
    ("Month.Day.Pad", |m| m.month.day.pad.clone()),
    ("Month.Day.Ord", |m| m.month.day.ord.clone()),
    ("Month.Week.Num", |m| m.month.week.num.to_string()),
    ("Month.Week.Pad", |m| m.month.week.pad.clone()),
    ("Month.Week.Ord", |m| m.month.week.ord.clone()),
    ("Month.Week.Day.Num", |m| m.month.week.day.num.to_string()),
    ("Month.Week.Day.Pad", |m| m.month.week.day.pad.clone()),
    ("Month.Week.Day.Ord", |m| m.month.week.day.ord.clone()),
    ("Month.Week.Day.Name", |m| m.month.week.day.name.clone()),
    ("Month.Week.Day.Short", |m| m.month.week.day.short.clone()),
    ("Day.Num", |m| m.day.num.to_string()),
    ("Day.Pad", |m| m.day.pad.clone()),
    ("Day.Ord", |m| m.day.ord.clone()),
    ("Day.Name", |m| m.day.name.clone()),
    ("Day.Short", |m| m.day.short.clone()),
];

const NOW_ROOT: &str = "Now";
const WEEK_COMMENCING_ROOT: &str = "WeekCommencing";

#[derive(Clone, Copy)]
enum Accessor {
    Now(DateField),
    WeekCommencing(DateField),
    EntryId,
    FileExtension,
    Topic,
}

impl Accessor {
    fn read(&self, context: &TemplateContext) -> String {
        match self {
            Accessor::Now(field) => field(context.now()),
            Accessor::WeekCommencing(field) => field(context.week_commencing()),
            Accessor::EntryId => context.entry_id().to_string(),
            Accessor::FileExtension => context.file_extension().to_string(),
            Accessor::Topic => context.topic().to_string(),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Accessor::Now(_) => NOW_ROOT,
            Accessor::WeekCommencing(_) => WEEK_COMMENCING_ROOT,
            Accessor::EntryId => "EntryID",
            Accessor::FileExtension => "FileExtension",
            Accessor::Topic => "Topic",
        };
        f.write_str(name)
    }
}

struct PlaceholderTable {
    names: Vec<String>,
    accessors: HashMap<String, Accessor>,
}

impl PlaceholderTable {
    fn build() -> Self {
        let mut entries = vec![
            ("EntryID".to_string(), Accessor::EntryId),
            ("FileExtension".to_string(), Accessor::FileExtension),
            ("Topic".to_string(), Accessor::Topic),
        ];
        for &(path, field) in DATE_FIELDS {
            entries.push((path.to_string(), Accessor::Now(field)));
        }
        for &(path, field) in DATE_FIELDS {
            entries.push((format!("{}.{}", NOW_ROOT, path), Accessor::Now(field)));
        }
        for &(path, field) in DATE_FIELDS {
            entries.push((
                format!("{}.{}", WEEK_COMMENCING_ROOT, path),
                Accessor::WeekCommencing(field),
            ));
        }

        PlaceholderTable {
            names: entries.iter().map(|(name, _)| name.clone()).collect(),
            accessors: entries.into_iter().collect(),
        }
    }
}

fn table() -> &'static PlaceholderTable {
    static TABLE: OnceLock<PlaceholderTable> = OnceLock::new();
    TABLE.get_or_init(PlaceholderTable::build)
}

/// Lists every supported placeholder path in a stable order.
pub fn placeholders() -> impl Iterator<Item = &'static str> {
    table().names.iter().map(String::as_str)
}

/// Reads a single placeholder path from `context`, or `None` if the path is unknown.
pub fn lookup(path: &str, context: &TemplateContext) -> Option<String> {
    table()
        .accessors
        .get(path)
        .map(|accessor| accessor.read(context))
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field { path: String, accessor: Accessor },
}

/// A parsed pattern whose placeholders are all known to resolve.
///
/// Parsing needs no context, so configured patterns can be checked before
/// any date is known; rendering a parsed pattern cannot fail.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use journal::templating::{Pattern, TemplateContext};
///
/// let pattern = Pattern::parse("{Year.Num}/{Month.Pad}/{EntryID}.{FileExtension}").unwrap();
///
/// let mut context = TemplateContext::assemble(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()).unwrap();
/// context.set_entry_id("notes");
/// context.set_file_extension("md");
///
/// assert_eq!(pattern.render(&context), "2024/06/notes.md");
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses `pattern`, checking delimiters and every placeholder path.
    ///
    /// # Errors
    ///
    /// Returns a `TemplateSyntaxError` naming the pattern and the broken
    /// fragment or unknown path.
    pub fn parse(pattern: &str) -> Result<Self, TemplateSyntaxError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((position, ch)) = chars.next() {
            match ch {
                '{' => {
                    if chars.next_if(|&(_, next)| next == '{').is_some() {
                        literal.push('{');
                        continue;
                    }

                    let mut close = None;
                    while let Some(&(index, next)) = chars.peek() {
                        if next == '{' {
                            break;
                        }
                        chars.next();
                        if next == '}' {
                            close = Some(index);
                            break;
                        }
                    }

                    let Some(close) = close else {
                        let stop = chars.peek().map_or(pattern.len(), |&(index, _)| index);
                        return Err(TemplateSyntaxError::Unterminated {
                            pattern: pattern.to_string(),
                            fragment: pattern[position..stop].to_string(),
                            position,
                        });
                    };

                    let path = pattern[position + 1..close].trim();
                    if path.is_empty() {
                        return Err(TemplateSyntaxError::EmptyPlaceholder {
                            pattern: pattern.to_string(),
                            position,
                        });
                    }

                    let accessor = *table().accessors.get(path).ok_or_else(|| {
                        TemplateSyntaxError::UnknownField {
                            pattern: pattern.to_string(),
                            path: path.to_string(),
                        }
                    })?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field {
                        path: path.to_string(),
                        accessor,
                    });
                }
                '}' => {
                    if chars.next_if(|&(_, next)| next == '}').is_none() {
                        return Err(TemplateSyntaxError::UnmatchedClose {
                            pattern: pattern.to_string(),
                            position,
                        });
                    }
                    literal.push('}');
                }
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Pattern {
            source: pattern.to_string(),
            segments,
        })
    }

    /// Substitutes every placeholder with its value in `context`.
    pub fn render(&self, context: &TemplateContext) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { accessor, .. } => out.push_str(&accessor.read(context)),
            }
        }
        out
    }

    /// The text the pattern was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder paths in the order they appear.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field { path, .. } => Some(path.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl FromStr for Pattern {
    type Err = TemplateSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}

/// Resolves `pattern` against `context` in one step.
///
/// A pattern without placeholders, including the empty string, comes back
/// unchanged.
///
/// # Errors
///
/// Returns a `TemplateSyntaxError` for unbalanced braces, empty placeholders
/// and unknown paths.
pub fn resolve(pattern: &str, context: &TemplateContext) -> Result<String, TemplateSyntaxError> {
    Ok(Pattern::parse(pattern)?.render(context))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn context() -> TemplateContext {
        let instant = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        TemplateContext::assemble(instant).unwrap()
    }

    #[test]
    fn test_resolve_scenarios() {
        let mut context = context();
        context.set_entry_id("foo");
        context.set_file_extension("md");
        context.set_topic("bar");

        let cases = [
            (
                "base",
                "/journal/{Year.Num}/{Month.Num}/{Day.Num}",
                "/journal/2024/6/28",
            ),
            (
                "week commencing",
                "/journal/{WeekCommencing.Year.Num}/{WeekCommencing.Month.Num}/{WeekCommencing.Day.Num}",
                "/journal/2024/6/24",
            ),
            (
                "entry metadata",
                "/journal/{Year.Num}/{Month.Num}/{Day.Num}/{EntryID}/{Topic}.{FileExtension}",
                "/journal/2024/6/28/foo/bar.md",
            ),
            (
                "ordinals",
                "{Month.Ord}/{Year.Week.Ord}/{Day.Ord}/{Year.Day.Ord}",
                "6th/26th/28th/180th",
            ),
            (
                "days in",
                "/journal/{Year.Num}/{Month.Ord} of 12 months/{Year.Day.Ord} day of {Year.DaysIn}",
                "/journal/2024/6th of 12 months/180th day of 366",
            ),
            (
                "explicit now root",
                "{Now.Year.Short}-{Now.Month.Short}-{Now.Day.Pad}",
                "24-Jun-28",
            ),
            (
                "deep nesting",
                "{Year.Week.Day.Ord} {Year.Month.Week.Day.Name} {WeekCommencing.Year.Week.Day.Short}",
                "5th Friday Mon",
            ),
            ("whitespace inside braces", "{ Day.Num }", "28"),
            ("escaped braces", "{{{Day.Num}}}", "{28}"),
        ];

        for (name, pattern, want) in cases {
            assert_eq!(resolve(pattern, &context).unwrap(), want, "{}", name);
        }
    }

    #[test]
    fn test_static_patterns_resolve_unchanged() {
        let context = context();
        for pattern in ["", "static-path/foo-note.md", "no placeholders at all"] {
            assert_eq!(resolve(pattern, &context).unwrap(), pattern);
        }
    }

    #[test]
    fn test_unterminated_placeholder() {
        let pattern = "{Year.Num/{Month.Num}/{Day.Num}";
        let err = resolve(pattern, &context()).unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::Unterminated {
                pattern: pattern.to_string(),
                fragment: "{Year.Num/".to_string(),
                position: 0,
            }
        );

        let err = resolve("notes/{Day.Num", &context()).unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::Unterminated {
                pattern: "notes/{Day.Num".to_string(),
                fragment: "{Day.Num".to_string(),
                position: 6,
            }
        );
    }

    #[test]
    fn test_unmatched_close() {
        let err = resolve("{Year.Num}}/x", &context()).unwrap_err();
        assert_eq!(
            err,
            TemplateSyntaxError::UnmatchedClose {
                pattern: "{Year.Num}}/x".to_string(),
                position: 10,
            }
        );
    }

    #[test]
    fn test_empty_placeholder() {
        let err = resolve("a/{  }/b", &context()).unwrap_err();
        assert!(matches!(
            err,
            TemplateSyntaxError::EmptyPlaceholder { position: 2, .. }
        ));
    }

    #[test]
    fn test_unknown_field() {
        for path in ["Year.Nmu", "Year", "WeekCommencing.EntryID", "now.Year.Num", "Year.Num.Ord"] {
            let pattern = format!("x/{{{}}}", path);
            let err = resolve(&pattern, &context()).unwrap_err();
            assert_eq!(
                err,
                TemplateSyntaxError::UnknownField {
                    pattern: pattern.clone(),
                    path: path.to_string(),
                },
                "{}",
                path
            );
        }
    }

    #[test]
    fn test_go_template_syntax_is_not_a_placeholder() {
        let err = resolve("{{.Year}}/{.Month}", &context()).unwrap_err();
        assert!(matches!(err, TemplateSyntaxError::UnknownField { ref path, .. } if path == ".Month"));
    }

    #[test]
    fn test_parse_without_context_and_fields() {
        let pattern: Pattern = "{Year.Num}/wc {WeekCommencing.Day.Pad}/{Topic}".parse().unwrap();
        let fields: Vec<&str> = pattern.fields().collect();
        assert_eq!(fields, vec!["Year.Num", "WeekCommencing.Day.Pad", "Topic"]);
        assert_eq!(pattern.source(), "{Year.Num}/wc {WeekCommencing.Day.Pad}/{Topic}");
    }

    #[test]
    fn test_every_listed_placeholder_resolves() {
        let context = context();
        let names: Vec<&str> = placeholders().collect();
        assert_eq!(names.len(), 3 + 3 * DATE_FIELDS.len());

        for name in names {
            let pattern = format!("{{{}}}", name);
            assert!(resolve(&pattern, &context).is_ok(), "{}", name);
            assert!(lookup(name, &context).is_some(), "{}", name);
        }
    }

    #[test]
    fn test_lookup() {
        let context = context();
        assert_eq!(lookup("Month.Name", &context).as_deref(), Some("June"));
        assert_eq!(lookup("WeekCommencing.Day.Name", &context).as_deref(), Some("Monday"));
        assert_eq!(lookup("Month.Nope", &context), None);
    }
}
