//! The directory processor.
//!
//! Drives unfolding, tokenizing, profile-stack bookkeeping, and value
//! resolution, producing the ordered content-line sequence and the final
//! [`Directory`]. All per-pass state is local to the call; nothing leaks
//! into the next invocation of the shared registry.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::tokenize;
use super::unfold::split_lines;
use crate::core::{ContentLine, Directory, Parameters, Value};
use crate::profile::registry::BlockPolicy;
use crate::profile::{DirectoryRegistry, ProfileState};

/// Parses a directory stream into a [`Directory`].
///
/// After the line pass, each profile encountered (in first-seen order) is
/// asked to materialize a directory; the first that does wins. Otherwise the
/// predefined profile's default construction is used.
///
/// ## Errors
/// Returns the first syntax, structural, or value error encountered.
#[tracing::instrument(skip(registry, input), fields(input_len = input.len()))]
pub fn parse(registry: &DirectoryRegistry, input: &str) -> ParseResult<Directory> {
    let (lines, seen_profiles) = process_lines(registry, input)?;

    for profile_name in &seen_profiles {
        if let Some(profile) = registry.profile(profile_name)
            && let Some(directory) = profile.create_directory(&lines)
        {
            tracing::debug!(profile = %profile_name, "Profile materialized directory");
            return Ok(directory);
        }
    }

    tracing::debug!("Falling back to predefined directory construction");
    Ok(registry
        .predefined()
        .create_directory(&lines)
        .unwrap_or_default())
}

/// Parses a directory stream into its processed content-line sequence.
///
/// ## Errors
/// Returns the first syntax, structural, or value error encountered.
#[tracing::instrument(skip(registry, input), fields(input_len = input.len()))]
pub fn process(registry: &DirectoryRegistry, input: &str) -> ParseResult<Vec<ContentLine>> {
    process_lines(registry, input).map(|(lines, _)| lines)
}

/// The line pass: tokenize each logical line, track the profile stack, and
/// materialize values. Returns the content lines plus the profile names
/// encountered, in first-seen order.
fn process_lines(
    registry: &DirectoryRegistry,
    input: &str,
) -> ParseResult<(Vec<ContentLine>, Vec<String>)> {
    let mut state = ProfileState::new();
    let mut lines = Vec::new();
    let mut seen_profiles: Vec<String> = Vec::new();
    let mut last_line_num = 0;

    let mut record_profile = |name: &str| {
        if !seen_profiles
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
        {
            seen_profiles.push(name.to_string());
        }
    };

    for (line_num, logical) in split_lines(input) {
        last_line_num = line_num;
        let raw = tokenize(&logical, line_num)?;

        match raw.name.as_str() {
            "PROFILE" => {
                let profile = raw.value.trim();
                record_profile(profile);
                state.set_explicit(profile);
            }
            "BEGIN" => {
                let block = raw.value.trim();
                record_profile(block);
                state.push(block);
            }
            "END" => {
                let block = raw.value.trim();
                let Some(top) = state.pop() else {
                    return Err(ParseError::new(
                        ParseErrorKind::EndWithoutBegin,
                        line_num,
                        format!("END:{block} with no matching BEGIN"),
                    ));
                };
                if !top.eq_ignore_ascii_case(block) {
                    return Err(ParseError::new(
                        ParseErrorKind::MismatchedEnd,
                        line_num,
                        format!("expected END:{top}, found END:{block}"),
                    ));
                }
            }
            _ => {
                let profile_name = state.current().map(str::to_string);
                let value_type = registry.resolve_value_type(
                    profile_name.as_deref(),
                    raw.group.as_deref(),
                    &raw.name,
                    &raw.params,
                );

                let values = materialize_values(
                    registry,
                    profile_name.as_deref(),
                    raw.group.as_deref(),
                    &raw.name,
                    &raw.params,
                    value_type.as_deref(),
                    &raw.value,
                    line_num,
                )?;

                // One sibling content line per produced value
                for value in values {
                    lines.push(ContentLine {
                        profile: profile_name.clone(),
                        group: raw.group.clone(),
                        name: raw.name.clone(),
                        params: raw.params.clone(),
                        value,
                    });
                }
            }
        }
    }

    if !state.stack_is_empty() {
        match registry.block_policy() {
            BlockPolicy::Tolerate => {
                tracing::warn!(depth = state.depth(), "BEGIN block left open at end of input");
            }
            BlockPolicy::Error => {
                return Err(ParseError::new(
                    ParseErrorKind::UnterminatedBlock,
                    last_line_num,
                    format!("{} BEGIN block(s) left open at end of input", state.depth()),
                ));
            }
        }
    }

    tracing::trace!(count = lines.len(), "Processed content lines");
    Ok((lines, seen_profiles))
}

/// Produces typed values for one line.
///
/// Order is load-bearing: the profile responsible for the line is tried
/// first through its value-factory capability regardless of the resolved
/// type, then the factory registered for the type, then the raw text is
/// kept verbatim.
#[expect(clippy::too_many_arguments)]
fn materialize_values(
    registry: &DirectoryRegistry,
    profile_name: Option<&str>,
    group: Option<&str>,
    name: &str,
    params: &Parameters,
    value_type: Option<&str>,
    raw: &str,
    line_num: usize,
) -> ParseResult<Vec<Value>> {
    let resolved = registry.resolved_profile(profile_name);
    if let Some(factory) = resolved.as_value_factory()
        && let Some(values) =
            factory.create_values(profile_name, group, name, params, value_type, raw, line_num)?
    {
        return Ok(values);
    }

    if let Some(value_type) = value_type
        && let Some(factory) = registry.factory(value_type)
        && let Some(values) =
            factory.create_values(profile_name, group, name, params, Some(value_type), raw, line_num)?
    {
        return Ok(values);
    }

    Ok(vec![Value::Raw(raw.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::UtcOffset;

    fn vcard_registry() -> DirectoryRegistry {
        DirectoryRegistry::vcard()
    }

    #[test]
    fn empty_block_yields_no_lines() {
        let registry = vcard_registry();
        let lines = registry.process("BEGIN:VCARD\r\nEND:VCARD\r\n").unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn lines_are_tagged_with_active_profile() {
        let registry = vcard_registry();
        let lines = registry
            .process("BEGIN:VCARD\r\nNOTE:inside\r\nEND:VCARD\r\nNOTE:outside\r\n")
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].profile.as_deref(), Some("VCARD"));
        assert_eq!(lines[1].profile, None);
    }

    #[test]
    fn profile_line_sets_explicit_profile() {
        let registry = vcard_registry();
        let lines = registry.process("PROFILE:VCARD\r\nTEL:5551212\r\n").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].profile.as_deref(), Some("VCARD"));
        assert_eq!(
            lines[0].value,
            Value::PhoneNumber("5551212".to_string())
        );
    }

    #[test]
    fn orphan_end_is_fatal() {
        let registry = vcard_registry();
        let err = registry
            .process("NOTE:before\r\nEND:FOO\r\nNOTE:after\r\n")
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EndWithoutBegin);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn mismatched_end_is_fatal() {
        let registry = vcard_registry();
        let err = registry
            .process("BEGIN:VCARD\r\nEND:VCAL\r\n")
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedEnd);
    }

    #[test]
    fn unterminated_block_tolerated_by_default() {
        let registry = vcard_registry();
        let lines = registry.process("BEGIN:VCARD\r\nNOTE:x\r\n").unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn unterminated_block_fatal_under_error_policy() {
        let mut registry = vcard_registry();
        registry.set_block_policy(BlockPolicy::Error);
        let err = registry.process("BEGIN:VCARD\r\nNOTE:x\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedBlock);
    }

    #[test]
    fn comma_list_produces_sibling_lines() {
        let registry = vcard_registry();
        let lines = registry
            .process("BEGIN:VCARD\r\nCATEGORIES:work,personal\r\nEND:VCARD\r\n")
            .unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].value.as_text(), Some("work"));
        assert_eq!(lines[1].value.as_text(), Some("personal"));
        assert_eq!(lines[0].name, lines[1].name);
        assert_eq!(lines[0].params, lines[1].params);
    }

    #[test]
    fn unknown_line_falls_back_to_raw() {
        let registry = vcard_registry();
        let lines = registry.process("X-THING:anything at all\r\n").unwrap();
        assert_eq!(
            lines[0].value,
            Value::Raw("anything at all".to_string())
        );
    }

    #[test]
    fn value_param_overrides_profile_type() {
        // TEL would be phone-number under vCard, but VALUE=text wins
        let registry = vcard_registry();
        let lines = registry
            .process("BEGIN:VCARD\r\nTEL;VALUE=text:call the front desk\r\nEND:VCARD\r\n")
            .unwrap();
        assert_eq!(
            lines[0].value,
            Value::Text("call the front desk".to_string())
        );
    }

    #[test]
    fn vcard_tz_parses_as_utc_offset() {
        let registry = vcard_registry();
        let lines = registry
            .process("BEGIN:VCARD\r\nTZ:-05:00\r\nEND:VCARD\r\n")
            .unwrap();
        assert_eq!(
            lines[0].value,
            Value::UtcOffset(UtcOffset::new(false, 5, 0))
        );
    }

    #[test]
    fn parse_falls_back_to_predefined_directory() {
        let registry = DirectoryRegistry::new();
        let dir = registry
            .parse("NAME:Team Roster\r\nSOURCE:ldap://example.com/cn=roster\r\n")
            .unwrap();
        assert_eq!(dir.kind, None);
        assert_eq!(dir.display_name.as_deref(), Some("Team Roster"));
        assert_eq!(dir.content_lines.len(), 1);
        assert_eq!(dir.content_lines[0].name, "SOURCE");
    }

    #[test]
    fn parse_prefers_block_profile() {
        let registry = vcard_registry();
        let dir = registry
            .parse("BEGIN:VCARD\r\nFN:John Doe\r\nEND:VCARD\r\n")
            .unwrap();
        assert_eq!(dir.kind.as_deref(), Some("VCARD"));
        assert_eq!(dir.display_name.as_deref(), Some("John Doe"));
    }

    #[test]
    fn syntax_error_aborts_whole_parse() {
        let registry = vcard_registry();
        let err = registry
            .process("NOTE:fine\r\nBROKEN\r\nNOTE:never reached\r\n")
            .unwrap_err();
        assert_eq!(err.line, 2);
    }
}
