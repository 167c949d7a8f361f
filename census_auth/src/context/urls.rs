//! Tenant URL templating.
//!
//! Templates contain the literal tokens SCHEME, SUB, DOMAIN and PATH.
//! The template is parsed once into segments and rendered in a single pass,
//! so values are never rescanned for tokens. Only the first occurrence of
//! each token is a placeholder; a token absent from the template is ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Scheme,
    Sub,
    Domain,
    Path,
}

impl Token {
    // Substitution order: SCHEME, SUB, DOMAIN, PATH
    const ALL: [Token; 4] = [Token::Scheme, Token::Sub, Token::Domain, Token::Path];

    fn literal(self) -> &'static str {
        match self {
            Token::Scheme => "SCHEME",
            Token::Sub => "SUB",
            Token::Domain => "DOMAIN",
            Token::Path => "PATH",
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder(Token),
}

#[derive(Debug, Clone)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn new(template: &str) -> Self {
        // Claim the first non-overlapping occurrence of each token,
        // in substitution order.
        let mut claimed: Vec<(usize, usize, Token)> = Vec::new();
        for token in Token::ALL {
            let needle = token.literal();
            let mut search = 0;
            while let Some(offset) = template[search..].find(needle) {
                let start = search + offset;
                let end = start + needle.len();
                if claimed.iter().any(|&(s, e, _)| start < e && s < end) {
                    search = start + 1;
                    continue;
                }
                claimed.push((start, end, token));
                break;
            }
        }
        claimed.sort_unstable_by_key(|&(start, _, _)| start);

        let mut segments = Vec::new();
        let mut cursor = 0;
        for (start, end, token) in claimed {
            if start > cursor {
                segments.push(Segment::Literal(template[cursor..start].to_string()));
            }
            segments.push(Segment::Placeholder(token));
            cursor = end;
        }
        if cursor < template.len() {
            segments.push(Segment::Literal(template[cursor..].to_string()));
        }

        Self { segments }
    }

    pub fn render(&self, scheme: &str, sub: &str, domain: &str, path: &str) -> String {
        let mut url = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Placeholder(Token::Scheme) => url.push_str(scheme),
                Segment::Placeholder(Token::Sub) => url.push_str(sub),
                Segment::Placeholder(Token::Domain) => url.push_str(domain),
                Segment::Placeholder(Token::Path) => url.push_str(path),
            }
        }
        url
    }
}

/// Route path for mounting per-tenant handlers under /subdomain/{domain}
pub fn scoped_path(relative: &str) -> String {
    format!("/subdomain/{{domain}}{relative}")
}
