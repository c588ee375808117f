use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
}

impl SelectorStep {
    pub(crate) fn id_only(&self) -> Option<&str> {
        if !self.universal && self.tag.is_none() && self.classes.is_empty() && self.attrs.is_empty()
        {
            self.id.as_deref()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
}

/// One compound step plus how it attaches to the step before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) combinator: SelectorCombinator,
    pub(crate) step: SelectorStep,
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    let mut groups = Vec::new();
    for group in split_selector_groups(selector)? {
        groups.push(parse_selector_chain(&group)?);
    }
    if groups.is_empty() {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    Ok(groups)
}

fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;
    let mut quote: Option<char> = None;

    for ch in selector.chars() {
        match quote {
            Some(open) => {
                current.push(ch);
                if ch == open {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '[' => {
                    bracket_depth += 1;
                    current.push(ch);
                }
                ']' => {
                    if bracket_depth == 0 {
                        return Err(Error::UnsupportedSelector(selector.to_string()));
                    }
                    bracket_depth -= 1;
                    current.push(ch);
                }
                ',' if bracket_depth == 0 => {
                    let trimmed = current.trim();
                    if trimmed.is_empty() {
                        return Err(Error::UnsupportedSelector(selector.to_string()));
                    }
                    groups.push(trimmed.to_string());
                    current.clear();
                }
                _ => current.push(ch),
            },
        }
    }

    if quote.is_some() || bracket_depth != 0 {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }

    let trimmed = current.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let mut parts = Vec::new();
    let mut pending_child = false;

    for token in tokenize_selector(selector)? {
        if token == ">" {
            if parts.is_empty() || pending_child {
                return Err(Error::UnsupportedSelector(selector.to_string()));
            }
            pending_child = true;
            continue;
        }
        let combinator = if pending_child {
            pending_child = false;
            SelectorCombinator::Child
        } else {
            SelectorCombinator::Descendant
        };
        parts.push(SelectorPart {
            combinator,
            step: parse_selector_step(&token, selector)?,
        });
    }

    if pending_child || parts.is_empty() {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    Ok(parts)
}

fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut bracket_depth = 0usize;

    for ch in selector.chars() {
        if bracket_depth > 0 {
            current.push(ch);
            if ch == ']' {
                bracket_depth -= 1;
            }
            continue;
        }
        match ch {
            '[' => {
                bracket_depth += 1;
                current.push(ch);
            }
            '>' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(">".to_string());
            }
            _ if ch.is_ascii_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if bracket_depth != 0 {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_selector_step(part: &str, whole: &str) -> Result<SelectorStep> {
    let mut step = SelectorStep::default();
    let bytes = part.as_bytes();
    let mut i = 0usize;

    if i < bytes.len() && bytes[i] == b'*' {
        step.universal = true;
        i += 1;
    } else if i < bytes.len() && is_selector_ident_char(bytes[i]) {
        let (ident, next) = parse_selector_ident(part, i)
            .ok_or_else(|| Error::UnsupportedSelector(whole.to_string()))?;
        step.tag = Some(ident.to_ascii_lowercase());
        i = next;
    }

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                let (ident, next) = parse_selector_ident(part, i + 1)
                    .ok_or_else(|| Error::UnsupportedSelector(whole.to_string()))?;
                step.id = Some(ident);
                i = next;
            }
            b'.' => {
                let (ident, next) = parse_selector_ident(part, i + 1)
                    .ok_or_else(|| Error::UnsupportedSelector(whole.to_string()))?;
                step.classes.push(ident);
                i = next;
            }
            b'[' => {
                let close = part[i..]
                    .find(']')
                    .map(|offset| i + offset)
                    .ok_or_else(|| Error::UnsupportedSelector(whole.to_string()))?;
                let body = &part[i + 1..close];
                step.attrs.push(parse_selector_attr_condition(body, whole)?);
                i = close + 1;
            }
            _ => return Err(Error::UnsupportedSelector(whole.to_string())),
        }
    }

    if !step.universal
        && step.tag.is_none()
        && step.id.is_none()
        && step.classes.is_empty()
        && step.attrs.is_empty()
    {
        return Err(Error::UnsupportedSelector(whole.to_string()));
    }
    Ok(step)
}

fn parse_selector_attr_condition(body: &str, whole: &str) -> Result<SelectorAttrCondition> {
    let body = body.trim();
    if body.is_empty() {
        return Err(Error::UnsupportedSelector(whole.to_string()));
    }

    let Some((key, value)) = body.split_once('=') else {
        if !body.bytes().all(is_selector_attr_name_char) {
            return Err(Error::UnsupportedSelector(whole.to_string()));
        }
        return Ok(SelectorAttrCondition::Exists {
            key: body.to_ascii_lowercase(),
        });
    };

    let key = key.trim();
    if key.is_empty() || !key.bytes().all(is_selector_attr_name_char) {
        return Err(Error::UnsupportedSelector(whole.to_string()));
    }

    let value = value.trim();
    let value = if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
    {
        &value[1..value.len() - 1]
    } else {
        value
    };

    Ok(SelectorAttrCondition::Eq {
        key: key.to_ascii_lowercase(),
        value: value.to_string(),
    })
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut i = start;
    while i < bytes.len() && is_selector_ident_char(bytes[i]) {
        i += 1;
    }
    if i == start {
        return None;
    }
    Some((src[start..i].to_string(), i))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_selector_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}
