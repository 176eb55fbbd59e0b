// cnpii-core/src/matchers/email.rs
//! Email address matcher.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::candidate::{log_filtered_debug, Candidate, CandidateSource};
use crate::category::Category;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

// Consumer mail providers; a hit here is almost never a false positive.
static COMMON_DOMAINS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend([
        "qq.com",
        "163.com",
        "126.com",
        "sina.com",
        "sohu.com",
        "aliyun.com",
        "foxmail.com",
        "outlook.com",
        "hotmail.com",
        "gmail.com",
        "yahoo.com",
        "icloud.com",
        "live.com",
        "yeah.net",
        "139.com",
    ]);
    set
});

const SCORE_BASE: f64 = 0.85;
const SCORE_COMMON_DOMAIN: f64 = 0.95;

pub fn find_candidates(text: &str) -> Vec<Candidate> {
    let mut results = Vec::new();

    for m in EMAIL.find_iter(text) {
        let email = m.as_str();
        if !is_structurally_valid(email) {
            log_filtered_debug(module_path!(), Category::Email, email, "structure_invalid");
            continue;
        }
        results.push(Candidate::new(
            Category::Email,
            m.start(),
            m.end(),
            score_for(email),
            CandidateSource::Pattern,
        ));
    }

    results
}

fn is_structurally_valid(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else { return false; };

    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if domain.is_empty() || domain.len() > 255 {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    !domain.contains("..")
}

fn score_for(email: &str) -> f64 {
    let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or("");
    if COMMON_DOMAINS.contains(domain.to_ascii_lowercase().as_str()) {
        SCORE_COMMON_DOMAIN
    } else {
        SCORE_BASE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_address() {
        let text = "邮箱是 ops-team@example.org ，请查收";
        let found = find_candidates(text);
        assert_eq!(found.len(), 1);
        assert_eq!(&text[found[0].start..found[0].end], "ops-team@example.org");
        assert!((found[0].score - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_common_domain_boost() {
        let found = find_candidates("联系 zhangsan@QQ.com");
        assert_eq!(found.len(), 1);
        assert!((found[0].score - 0.95).abs() < f64::EPSILON);
    }

    #[test]
    fn test_overlong_local_part_rejected() {
        let local = "a".repeat(65);
        assert!(find_candidates(&format!("{local}@example.com")).is_empty());
    }
}
