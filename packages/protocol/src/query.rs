//! The startup query string grammar.
//!
//! A frame learns what to render from its query string:
//!
//! ```text
//! outerKind=<Single|Cross>&viewKind=<main|block|asset|creatable>[&payload][&id=..|&context=..]
//! ```
//!
//! Segments are read by position. The first two are the outer and view kind
//! no matter what their keys are called, and a bare segment (`Single&main`)
//! stands for its own value. The payload is identified by its key (`block`,
//! `locator`/`hrl`, `creatable`, or the generic `payload`). The last segment
//! is the dialog `id` of a creatable or the optional `context` blob of a
//! block or asset.

use url::form_urlencoded;

use crate::error::QueryError;
use crate::locator::{Context, Locator};
use crate::types::ViewScope;

/// A parsed startup query, before any host round-trip.
///
/// Asset and creatable views only exist for single-tool frames, so the
/// invalid pairings are not representable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewQuery {
    Single(SingleQuery),
    Cross(CrossQuery),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleQuery {
    Main,
    Block {
        name: String,
        context: Option<Context>,
    },
    Asset {
        locator: Locator,
    },
    Creatable {
        name: String,
        dialog_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossQuery {
    Main,
    Block {
        name: String,
        context: Option<Context>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Main,
    Block,
    Asset,
    Creatable,
}

impl ViewKind {
    fn parse(s: &str) -> Result<Self, QueryError> {
        match s.to_ascii_lowercase().as_str() {
            "main" => Ok(ViewKind::Main),
            "block" => Ok(ViewKind::Block),
            "asset" => Ok(ViewKind::Asset),
            "creatable" => Ok(ViewKind::Creatable),
            _ => Err(QueryError::UnknownViewKind(s.to_string())),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ViewKind::Main => "main",
            ViewKind::Block => "block",
            ViewKind::Asset => "asset",
            ViewKind::Creatable => "creatable",
        }
    }

    /// Keys that may introduce this view's payload segment.
    fn payload_keys(self) -> &'static [&'static str] {
        match self {
            ViewKind::Main => &[],
            ViewKind::Block => &["block", "payload"],
            ViewKind::Asset => &["locator", "hrl", "payload"],
            ViewKind::Creatable => &["creatable", "payload"],
        }
    }
}

fn parse_scope(s: &str) -> Result<ViewScope, QueryError> {
    match s.to_ascii_lowercase().as_str() {
        "single" | "applet-view" => Ok(ViewScope::Single),
        "cross" | "cross-group-view" => Ok(ViewScope::Cross),
        _ => Err(QueryError::UnknownOuterKind(s.to_string())),
    }
}

/// One `&`-separated segment, percent-decoded.
#[derive(Debug)]
struct Segment {
    key: String,
    /// `None` for a bare segment without `=`.
    value: Option<String>,
}

impl Segment {
    /// Split and percent-decode one segment. A literal `+` stays a `+`, so
    /// standard-alphabet base64 survives.
    fn parse(raw: &str) -> Self {
        let raw = raw.replace('+', "%2B");
        let (key, value) = form_urlencoded::parse(raw.as_bytes())
            .next()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .unwrap_or_default();
        Self {
            key,
            value: raw.contains('=').then_some(value),
        }
    }

    /// The value of a positional segment: its value, or itself when bare.
    fn positional(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.key)
    }
}

/// Cursor over the segments after the two positional ones.
struct Tail<'a> {
    query: &'a str,
    view: ViewKind,
    segments: std::slice::Iter<'a, Segment>,
}

impl Tail<'_> {
    fn payload(&mut self) -> Result<String, QueryError> {
        let missing = QueryError::MissingSegment {
            query: self.query.to_string(),
            segment: "payload",
        };
        let segment = self.segments.next().ok_or_else(|| missing.clone())?;

        match &segment.value {
            None if !segment.key.is_empty() => Ok(segment.key.clone()),
            None => Err(missing),
            Some(_) if matches!(segment.key.as_str(), "id" | "context") => Err(missing),
            Some(value) if self.view.payload_keys().contains(&segment.key.as_str()) => {
                if value.is_empty() {
                    Err(missing)
                } else {
                    Ok(value.clone())
                }
            }
            Some(_) => Err(self.unexpected(segment)),
        }
    }

    fn context(&mut self) -> Result<Option<Context>, QueryError> {
        match self.segments.next() {
            None => Ok(None),
            Some(segment) if segment.key == "context" => {
                let value = segment.value.as_deref().unwrap_or_default();
                Context::from_base64(value)
                    .map(Some)
                    .map_err(|e| QueryError::Context(e.to_string()))
            }
            Some(segment) => Err(self.unexpected(segment)),
        }
    }

    fn dialog_id(&mut self) -> Result<String, QueryError> {
        match self.segments.next() {
            Some(segment) if segment.key == "id" => match segment.value.as_deref() {
                Some(id) if !id.is_empty() => Ok(id.to_string()),
                _ => Err(self.missing("id")),
            },
            Some(segment) => Err(self.unexpected(segment)),
            None => Err(self.missing("id")),
        }
    }

    fn finish(mut self) -> Result<(), QueryError> {
        match self.segments.next() {
            None => Ok(()),
            Some(_) => Err(QueryError::TrailingSegments(self.query.to_string())),
        }
    }

    fn missing(&self, segment: &'static str) -> QueryError {
        QueryError::MissingSegment {
            query: self.query.to_string(),
            segment,
        }
    }

    fn unexpected(&self, segment: &Segment) -> QueryError {
        QueryError::UnexpectedPayload {
            key: segment.key.clone(),
            view: self.view.name(),
        }
    }
}

impl ViewQuery {
    /// Parse a startup query string. A leading `?` is ignored.
    pub fn parse(input: &str) -> Result<Self, QueryError> {
        let query = input.strip_prefix('?').unwrap_or(input);
        if query.is_empty() {
            return Err(QueryError::Empty);
        }

        let segments: Vec<Segment> = query.split('&').map(Segment::parse).collect();
        let missing = |segment| QueryError::MissingSegment {
            query: query.to_string(),
            segment,
        };

        let scope = parse_scope(segments.first().ok_or(missing("outer kind"))?.positional())?;
        let view = ViewKind::parse(segments.get(1).ok_or(missing("view kind"))?.positional())?;

        if scope == ViewScope::Cross && matches!(view, ViewKind::Asset | ViewKind::Creatable) {
            return Err(QueryError::InvalidPairing { view: view.name() });
        }

        let mut tail = Tail {
            query,
            view,
            segments: segments[2..].iter(),
        };

        let parsed = match (scope, view) {
            (ViewScope::Single, ViewKind::Main) => ViewQuery::Single(SingleQuery::Main),
            (ViewScope::Cross, ViewKind::Main) => ViewQuery::Cross(CrossQuery::Main),
            (scope, ViewKind::Block) => {
                let name = tail.payload()?;
                let context = tail.context()?;
                match scope {
                    ViewScope::Single => ViewQuery::Single(SingleQuery::Block { name, context }),
                    ViewScope::Cross => ViewQuery::Cross(CrossQuery::Block { name, context }),
                }
            }
            (_, ViewKind::Asset) => {
                let hrl = tail.payload()?;
                let mut locator =
                    Locator::parse_hrl(&hrl).map_err(|e| QueryError::Locator(e.to_string()))?;
                locator.context = tail.context()?;
                ViewQuery::Single(SingleQuery::Asset { locator })
            }
            (_, ViewKind::Creatable) => {
                let name = tail.payload()?;
                let dialog_id = tail.dialog_id()?;
                ViewQuery::Single(SingleQuery::Creatable { name, dialog_id })
            }
        };

        tail.finish()?;
        Ok(parsed)
    }

    pub fn scope(&self) -> ViewScope {
        match self {
            ViewQuery::Single(_) => ViewScope::Single,
            ViewQuery::Cross(_) => ViewScope::Cross,
        }
    }

    /// Whether this is the main view of a single tool, the only view that
    /// answers host-initiated requests.
    pub fn is_single_main(&self) -> bool {
        matches!(self, ViewQuery::Single(SingleQuery::Main))
    }

    /// Canonical query string for this view, as a host builds it.
    ///
    /// Spaces are written as `%20`; a bare `+` is never produced.
    pub fn to_query_string(&self) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        let outer = match self.scope() {
            ViewScope::Single => "Single",
            ViewScope::Cross => "Cross",
        };
        out.append_pair("outerKind", outer);

        match self {
            ViewQuery::Single(SingleQuery::Main) | ViewQuery::Cross(CrossQuery::Main) => {
                out.append_pair("viewKind", "main");
            }
            ViewQuery::Single(SingleQuery::Block { name, context })
            | ViewQuery::Cross(CrossQuery::Block { name, context }) => {
                append_block(&mut out, name, context.as_ref());
            }
            ViewQuery::Single(SingleQuery::Asset { locator }) => {
                out.append_pair("viewKind", "asset");
                out.append_pair("locator", &locator.hrl());
                if let Some(context) = &locator.context {
                    out.append_pair("context", &context.to_base64());
                }
            }
            ViewQuery::Single(SingleQuery::Creatable { name, dialog_id }) => {
                out.append_pair("viewKind", "creatable");
                out.append_pair("creatable", name);
                out.append_pair("id", dialog_id);
            }
        }

        out.finish().replace('+', "%20")
    }
}

fn append_block(
    out: &mut form_urlencoded::Serializer<'_, String>,
    name: &str,
    context: Option<&Context>,
) {
    out.append_pair("viewKind", "block");
    out.append_pair("block", name);
    if let Some(context) = context {
        out.append_pair("context", &context.to_base64());
    }
}

impl std::str::FromStr for ViewQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, QueryError> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashB64;

    fn locator() -> Locator {
        Locator::new(
            HashB64::parse("uhC0kAAA").unwrap(),
            HashB64::parse("uhCkkBBB").unwrap(),
        )
    }

    #[test]
    fn bare_single_main() {
        assert_eq!(
            ViewQuery::parse("Single&main").unwrap(),
            ViewQuery::Single(SingleQuery::Main)
        );
    }

    #[test]
    fn keyed_cross_main() {
        assert_eq!(
            ViewQuery::parse("?outerKind=Cross&viewKind=main").unwrap(),
            ViewQuery::Cross(CrossQuery::Main)
        );
    }

    #[test]
    fn legacy_outer_names() {
        assert_eq!(
            ViewQuery::parse("view=applet-view&view-type=main").unwrap(),
            ViewQuery::Single(SingleQuery::Main)
        );
        assert_eq!(
            ViewQuery::parse("view=cross-group-view&view-type=block&block=board").unwrap(),
            ViewQuery::Cross(CrossQuery::Block {
                name: "board".to_string(),
                context: None
            })
        );
    }

    #[test]
    fn block_with_context() {
        let q = ViewQuery::parse("outerKind=Single&viewKind=block&block=card&context=gA").unwrap();
        assert_eq!(
            q,
            ViewQuery::Single(SingleQuery::Block {
                name: "card".to_string(),
                context: Some(Context::new(vec![0x80])),
            })
        );
    }

    #[test]
    fn block_missing_name() {
        assert!(matches!(
            ViewQuery::parse("Single&block"),
            Err(QueryError::MissingSegment {
                segment: "payload",
                ..
            })
        ));
        assert!(matches!(
            ViewQuery::parse("Single&block&context=gA"),
            Err(QueryError::MissingSegment {
                segment: "payload",
                ..
            })
        ));
    }

    #[test]
    fn asset_with_locator_and_context() {
        let q = ViewQuery::parse("Single&asset&locator=hrl://uhC0kAAA/uhCkkBBB&context=gA").unwrap();
        assert_eq!(
            q,
            ViewQuery::Single(SingleQuery::Asset {
                locator: locator().with_context(Context::new(vec![0x80])),
            })
        );
    }

    #[test]
    fn asset_bare_locator() {
        let q = ViewQuery::parse("Single&asset&hrl://uhC0kAAA/uhCkkBBB").unwrap();
        assert_eq!(q, ViewQuery::Single(SingleQuery::Asset { locator: locator() }));
    }

    #[test]
    fn asset_bad_locator() {
        assert!(matches!(
            ViewQuery::parse("Single&asset&locator=nope"),
            Err(QueryError::Locator(_))
        ));
    }

    #[test]
    fn creatable() {
        let q = ViewQuery::parse("Single&creatable&creatable=card&id=dlg-7").unwrap();
        assert_eq!(
            q,
            ViewQuery::Single(SingleQuery::Creatable {
                name: "card".to_string(),
                dialog_id: "dlg-7".to_string(),
            })
        );
    }

    #[test]
    fn creatable_missing_id() {
        assert!(matches!(
            ViewQuery::parse("Single&creatable&creatable=card"),
            Err(QueryError::MissingSegment { segment: "id", .. })
        ));
        assert!(matches!(
            ViewQuery::parse("Single&creatable&creatable=card&id="),
            Err(QueryError::MissingSegment { segment: "id", .. })
        ));
    }

    #[test]
    fn cross_asset_and_creatable_rejected() {
        assert_eq!(
            ViewQuery::parse("Cross&creatable&creatable=card&id=1"),
            Err(QueryError::InvalidPairing { view: "creatable" })
        );
        assert_eq!(
            ViewQuery::parse("Cross&asset&locator=hrl://uhC0kAAA/uhCkkBBB"),
            Err(QueryError::InvalidPairing { view: "asset" })
        );
    }

    #[test]
    fn unknown_kinds() {
        assert_eq!(
            ViewQuery::parse("Double&main"),
            Err(QueryError::UnknownOuterKind("Double".to_string()))
        );
        assert_eq!(
            ViewQuery::parse("Single&gallery"),
            Err(QueryError::UnknownViewKind("gallery".to_string()))
        );
    }

    #[test]
    fn missing_view_kind() {
        assert!(matches!(
            ViewQuery::parse("Single"),
            Err(QueryError::MissingSegment {
                segment: "view kind",
                ..
            })
        ));
        assert_eq!(ViewQuery::parse(""), Err(QueryError::Empty));
        assert_eq!(ViewQuery::parse("?"), Err(QueryError::Empty));
    }

    #[test]
    fn payload_key_must_fit_view() {
        assert_eq!(
            ViewQuery::parse("Single&block&creatable=card"),
            Err(QueryError::UnexpectedPayload {
                key: "creatable".to_string(),
                view: "block",
            })
        );
    }

    #[test]
    fn trailing_segments_rejected() {
        assert!(matches!(
            ViewQuery::parse("Single&main&block=x"),
            Err(QueryError::TrailingSegments(_))
        ));
        assert!(matches!(
            ViewQuery::parse("Single&block&block=x&context=gA&extra=1"),
            Err(QueryError::TrailingSegments(_))
        ));
    }

    #[test]
    fn bad_context() {
        assert!(matches!(
            ViewQuery::parse("Single&block&block=x&context=%21%21"),
            Err(QueryError::Context(_))
        ));
    }

    #[test]
    fn percent_decoded_values() {
        let q = ViewQuery::parse("Single&block&block=my%20board").unwrap();
        assert_eq!(
            q,
            ViewQuery::Single(SingleQuery::Block {
                name: "my board".to_string(),
                context: None
            })
        );
    }

    #[test]
    fn standard_alphabet_context() {
        let q = ViewQuery::parse("Single&block&block=x&context=+/8=").unwrap();
        assert_eq!(
            q,
            ViewQuery::Single(SingleQuery::Block {
                name: "x".to_string(),
                context: Some(Context::new(vec![0xfb, 0xff])),
            })
        );
        assert!(ViewQuery::parse("Single&block&block=x&context=%2B%2F8%3D").is_ok());
    }

    #[test]
    fn asset_locator_with_extra_slash_rejected() {
        assert!(matches!(
            ViewQuery::parse("Single&asset&locator=hrl://uhC0k/ab/uhCkkB"),
            Err(QueryError::Locator(_))
        ));
    }

    #[test]
    fn canonical_form_escapes_slash_and_space() {
        let q = ViewQuery::Single(SingleQuery::Asset {
            locator: Locator::new(
                HashB64::parse("uhC0k/ab").unwrap(),
                HashB64::parse("uhCk+kB").unwrap(),
            ),
        });
        let s = q.to_query_string();
        assert!(!s.contains('+'));
        assert_eq!(ViewQuery::parse(&s).unwrap(), q);

        let block = ViewQuery::Cross(CrossQuery::Block {
            name: "my board".to_string(),
            context: None,
        });
        assert!(block.to_query_string().contains("block=my%20board"));
        assert_eq!(ViewQuery::parse(&block.to_query_string()).unwrap(), block);
    }

    #[test]
    fn canonical_form() {
        let q = ViewQuery::Single(SingleQuery::Asset {
            locator: locator().with_context(Context::new(vec![0x80])),
        });
        let s = q.to_query_string();
        assert!(s.starts_with("outerKind=Single&viewKind=asset&locator=hrl"));
        assert!(s.ends_with("&context=gA"));
        assert_eq!(ViewQuery::parse(&s).unwrap(), q);
    }

    #[test]
    fn single_main_flag() {
        assert!(ViewQuery::Single(SingleQuery::Main).is_single_main());
        assert!(!ViewQuery::Cross(CrossQuery::Main).is_single_main());
    }
}
