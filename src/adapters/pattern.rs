//! Pattern-driven string synthesis.
//!
//! Covers the regex subset that shows up in validation schemas:
//! - literals and `.`
//! - `\d` `\D` `\w` `\W` `\s` `\S` `\n` `\t`, any other escaped char is literal
//! - `[abc]`, `[a-z0-9_]`, negated `[^...]`
//! - groups `(...)`, `(?:...)` with `|` alternation
//! - quantifiers `?` `*` `+` `{n}` `{n,}` `{n,m}` (a trailing lazy `?` is ignored)
//! - anchors `^` `$` and `\b` are dropped
//!
//! Unbalanced brackets degrade to literals; synthesis never fails.

use rand::Rng;
use std::iter::Peekable;
use std::str::Chars;

/// Extra repetitions allowed for open-ended quantifiers (`*`, `+`, `{n,}`).
const UNBOUNDED_EXTRA: usize = 3;

#[derive(Debug, Clone)]
enum Atom {
    Literal(char),
    Class(Vec<char>),
    Group(Vec<Vec<Node>>),
}

#[derive(Debug, Clone)]
struct Node {
    atom: Atom,
    min: usize,
    max: Option<usize>,
}

impl Node {
    fn once(atom: Atom) -> Self {
        Self {
            atom,
            min: 1,
            max: Some(1),
        }
    }
}

/// Generate a string matching `pattern`.
pub fn expand_pattern<R: Rng + ?Sized>(pattern: &str, rng: &mut R) -> String {
    let mut chars = pattern.chars().peekable();
    let alternatives = parse_alternatives(&mut chars, false);
    let mut result = String::new();
    emit_alternatives(&alternatives, rng, &mut result);
    result
}

fn parse_alternatives(chars: &mut Peekable<Chars<'_>>, in_group: bool) -> Vec<Vec<Node>> {
    let mut alternatives = Vec::new();
    let mut current: Vec<Node> = Vec::new();

    while let Some(ch) = chars.next() {
        match ch {
            ')' if in_group => break,
            '|' => alternatives.push(std::mem::take(&mut current)),
            '^' | '$' => {}
            '(' => {
                if chars.peek() == Some(&'?') {
                    chars.next();
                    if chars.peek() == Some(&':') {
                        chars.next();
                    }
                }
                let group = parse_alternatives(chars, true);
                current.push(Node::once(Atom::Group(group)));
            }
            '[' => current.push(Node::once(parse_class(chars))),
            '\\' => match chars.next() {
                Some('b') | Some('B') => {}
                Some(next) => current.push(Node::once(escape_atom(next))),
                None => current.push(Node::once(Atom::Literal('\\'))),
            },
            '.' => current.push(Node::once(Atom::Class(word_chars()))),
            '*' | '+' | '?' if !current.is_empty() => {
                let (min, max) = match ch {
                    '*' => (0, None),
                    '+' => (1, None),
                    _ => (0, Some(1)),
                };
                apply_quantifier(&mut current, min, max, chars);
            }
            '{' if !current.is_empty() => {
                let mut body = String::new();
                let mut closed = false;
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next == '}' {
                        closed = true;
                        break;
                    }
                    body.push(next);
                }
                match parse_repetition(&body).filter(|_| closed) {
                    Some((min, max)) => apply_quantifier(&mut current, min, max, chars),
                    None => {
                        current.push(Node::once(Atom::Literal('{')));
                        current.extend(body.chars().map(|c| Node::once(Atom::Literal(c))));
                        if closed {
                            current.push(Node::once(Atom::Literal('}')));
                        }
                    }
                }
            }
            _ => current.push(Node::once(Atom::Literal(ch))),
        }
    }

    alternatives.push(current);
    alternatives
}

fn apply_quantifier(
    current: &mut [Node],
    min: usize,
    max: Option<usize>,
    chars: &mut Peekable<Chars<'_>>,
) {
    if let Some(last) = current.last_mut() {
        last.min = min;
        last.max = max;
    }
    if chars.peek() == Some(&'?') {
        chars.next();
    }
}

fn parse_repetition(body: &str) -> Option<(usize, Option<usize>)> {
    match body.split_once(',') {
        None => {
            let n = body.trim().parse().ok()?;
            Some((n, Some(n)))
        }
        Some((min, max)) => {
            let min = min.trim().parse().ok()?;
            let max = if max.trim().is_empty() {
                None
            } else {
                Some(max.trim().parse().ok()?)
            };
            match max {
                Some(max) if max < min => Some((min, Some(min))),
                _ => Some((min, max)),
            }
        }
    }
}

fn parse_class(chars: &mut Peekable<Chars<'_>>) -> Atom {
    let negated = chars.peek() == Some(&'^');
    if negated {
        chars.next();
    }

    let mut class_chars: Vec<char> = Vec::new();
    while let Some(c) = chars.next() {
        if c == ']' {
            break;
        }
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                match escape_atom(escaped) {
                    Atom::Class(set) => class_chars.extend(set),
                    Atom::Literal(literal) => class_chars.push(literal),
                    Atom::Group(_) => {}
                }
            }
            continue;
        }
        if chars.peek() == Some(&'-') {
            chars.next();
            match chars.peek() {
                Some(&end) if end != ']' => {
                    chars.next();
                    let (start, end) = if c <= end { (c, end) } else { (end, c) };
                    class_chars.extend(start..=end);
                }
                _ => {
                    class_chars.push(c);
                    class_chars.push('-');
                }
            }
            continue;
        }
        class_chars.push(c);
    }

    if negated {
        let excluded = class_chars;
        class_chars = printable_chars()
            .into_iter()
            .filter(|c| !excluded.contains(c))
            .collect();
    }

    if class_chars.is_empty() {
        Atom::Literal('x')
    } else {
        Atom::Class(class_chars)
    }
}

fn escape_atom(next: char) -> Atom {
    match next {
        'd' => Atom::Class(('0'..='9').collect()),
        'D' | 'S' => Atom::Class(('a'..='z').chain('A'..='Z').collect()),
        'w' => Atom::Class(word_chars()),
        'W' => Atom::Class(vec![' ', '!', '@', '#', '$', '%', '^', '&', '*']),
        's' => Atom::Literal(' '),
        'n' => Atom::Literal('\n'),
        't' => Atom::Literal('\t'),
        other => Atom::Literal(other),
    }
}

fn word_chars() -> Vec<char> {
    ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(std::iter::once('_'))
        .collect()
}

fn printable_chars() -> Vec<char> {
    (' '..='~').collect()
}

fn emit_alternatives<R: Rng + ?Sized>(alternatives: &[Vec<Node>], rng: &mut R, out: &mut String) {
    if alternatives.is_empty() {
        return;
    }
    let chosen = &alternatives[rng.gen_range(0..alternatives.len())];
    for node in chosen {
        let max = node.max.unwrap_or(node.min + UNBOUNDED_EXTRA);
        let count = if max <= node.min {
            node.min
        } else {
            rng.gen_range(node.min..=max)
        };
        for _ in 0..count {
            match &node.atom {
                Atom::Literal(c) => out.push(*c),
                Atom::Class(set) => out.push(set[rng.gen_range(0..set.len())]),
                Atom::Group(group) => emit_alternatives(group, rng, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn expand(pattern: &str, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        expand_pattern(pattern, &mut rng)
    }

    #[test]
    fn test_fixed_repetition() {
        for seed in 0..20 {
            let out = expand(r"^\d{3}-\d{4}$", seed);
            assert_eq!(out.len(), 8, "{out}");
            assert_eq!(&out[3..4], "-");
            assert!(out[..3].chars().all(|c| c.is_ascii_digit()));
            assert!(out[4..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_class_ranges_and_plus() {
        for seed in 0..20 {
            let out = expand("[A-Z]{2}[0-9]+", seed);
            let (letters, digits) = out.split_at(2);
            assert!(letters.chars().all(|c| c.is_ascii_uppercase()), "{out}");
            assert!(!digits.is_empty() && digits.len() <= 1 + UNBOUNDED_EXTRA);
            assert!(digits.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_alternation_in_group() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..50 {
            let out = expand("(cat|dog)s?", seed);
            assert!(["cat", "cats", "dog", "dogs"].contains(&out.as_str()), "{out}");
            seen.insert(out[..3].to_string());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_negated_class_excludes_members() {
        for seed in 0..50 {
            let out = expand("[^a-z]{5}", seed);
            assert_eq!(out.chars().count(), 5);
            assert!(!out.chars().any(|c| c.is_ascii_lowercase()), "{out}");
        }
    }

    #[test]
    fn test_malformed_pattern_degrades_to_literals() {
        assert_eq!(expand("a{x}", 1), "a{x}");
        assert_eq!(expand("[", 1), "x");
    }
}
