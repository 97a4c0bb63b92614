//! Deterministic agent ordering.

use crate::types::Agent;

/// Known domains in display order. Anything else sorts after all of these.
pub const DOMAIN_SORT_ORDER: &[&str] = &[
    "aerospace",
    "financial",
    "game-dev",
    "ios-dev",
    "research",
    "software-dev",
];

/// Position of `domain` in [`DOMAIN_SORT_ORDER`]; unknown domains share the
/// rank one past the end.
pub fn domain_rank(domain: &str) -> usize {
    DOMAIN_SORT_ORDER
        .iter()
        .position(|d| *d == domain)
        .unwrap_or(DOMAIN_SORT_ORDER.len())
}

/// Return a new list ordered by (domain rank, lower-cased name).
///
/// Slug is the final tiebreak so the order is total: every permutation of the
/// same input yields the same output.
pub fn sort_agents(agents: &[Agent]) -> Vec<Agent> {
    let mut sorted = agents.to_vec();
    sorted.sort_by_cached_key(|a| (domain_rank(&a.domain), a.name.to_lowercase(), a.slug.clone()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentPaths, AgentSlug, PermissionMode, RepoPath};
    use rstest::rstest;

    fn agent(slug: &str, name: &str, domain: &str) -> Agent {
        let p = |s: &str| RepoPath::from(format!("agents/{slug}/{s}"));
        Agent {
            name: name.to_string(),
            slug: AgentSlug::from(slug),
            domain: domain.to_string(),
            role: "Role".to_string(),
            description: "does things".to_string(),
            model: "large".to_string(),
            capabilities: vec![],
            delegates_to: vec![],
            paths: AgentPaths {
                core: p("CORE.md"),
                cheatsheets: p("cheatsheets/"),
                cheatsheet_index: p("cheatsheets/_index.md"),
                memory: p("memory/"),
                mistakes: p("memory/mistakes.md"),
                session_log: p("memory/session-log.md"),
                decisions: p("memory/decisions.md"),
            },
            skills: vec![],
            tools: None,
            permission_mode: PermissionMode::Default,
            memory: None,
            isolation: None,
        }
    }

    fn slugs(agents: &[Agent]) -> Vec<&str> {
        agents.iter().map(|a| a.slug.0.as_str()).collect()
    }

    #[rstest]
    #[case("aerospace", 0)]
    #[case("software-dev", 5)]
    #[case("cooking", 6)]
    #[case("", 6)]
    fn rank_of_domain(#[case] domain: &str, #[case] expected: usize) {
        assert_eq!(domain_rank(domain), expected);
    }

    #[test]
    fn aerospace_sorts_before_research_regardless_of_name() {
        let input = vec![agent("ada", "Ada", "research"), agent("zed", "Zed", "aerospace")];
        assert_eq!(slugs(&sort_agents(&input)), ["zed", "ada"]);
    }

    #[test]
    fn names_compare_case_insensitively_within_a_domain() {
        let input = vec![
            agent("b", "bravo", "financial"),
            agent("a", "Alpha", "financial"),
            agent("c", "Charlie", "financial"),
        ];
        assert_eq!(slugs(&sort_agents(&input)), ["a", "b", "c"]);
    }

    #[test]
    fn unknown_domains_sort_last_and_by_name_only() {
        let input = vec![
            agent("x", "Xeno", "zoology"),
            agent("m", "Mira", "botany"),
            agent("s", "Sol", "software-dev"),
        ];
        assert_eq!(slugs(&sort_agents(&input)), ["s", "m", "x"]);
    }

    #[test]
    fn every_permutation_sorts_identically() {
        let base = vec![
            agent("nav", "Nav", "aerospace"),
            agent("quant", "Quant", "financial"),
            agent("sage", "sage", "research"),
            agent("sage-2", "Sage", "research"),
            agent("misc", "Misc", "unlisted"),
        ];
        let expected = slugs(&sort_agents(&base)).join(",");

        // Heap's algorithm over the indices.
        let mut idx: Vec<usize> = (0..base.len()).collect();
        let mut c = vec![0usize; idx.len()];
        let check = |order: &[usize]| {
            let permuted: Vec<Agent> = order.iter().map(|i| base[*i].clone()).collect();
            assert_eq!(slugs(&sort_agents(&permuted)).join(","), expected);
        };
        check(&idx);
        let mut i = 0;
        while i < idx.len() {
            if c[i] < i {
                if i % 2 == 0 {
                    idx.swap(0, i);
                } else {
                    idx.swap(c[i], i);
                }
                check(&idx);
                c[i] += 1;
                i = 0;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
    }

    #[test]
    fn sorting_does_not_mutate_input() {
        let input = vec![agent("b", "B", "research"), agent("a", "A", "aerospace")];
        let before = input.clone();
        let _ = sort_agents(&input);
        assert_eq!(input, before);
    }
}
