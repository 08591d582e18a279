//! Candidate matching for the discovery views.
//!
//! A single pure function serves both the suggestion feed and the browse
//! view; the views differ only in the `MatchPolicy` they pass.

use super::model::{DomainRule, MatchFilters, MatchPolicy, UnknownRolePolicy, Viewer};
use crate::user::{Role, UserDocument, UserProfile};

/// Returns the candidates relevant to `viewer`, in input order.
///
/// Candidates go through three stages, each of which can only reject:
/// role complementarity, domain compatibility (when the policy asks for it),
/// then the text and browse post-filters. The caller is expected to have
/// removed the viewer's own document already.
pub fn match_candidates<'a>(
    viewer: &Viewer,
    candidates: &'a [UserDocument],
    filters: &MatchFilters,
    policy: MatchPolicy,
) -> Vec<&'a UserDocument> {
    let Some(viewer_role) = viewer.role else {
        return match policy.unknown_role {
            UnknownRolePolicy::ExcludeAll => Vec::new(),
            UnknownRolePolicy::PassThrough => candidates
                .iter()
                .filter(|doc| passes_filters(&doc.profile, filters))
                .collect(),
        };
    };

    let viewer_domains = ViewerDomains::new(viewer, viewer_role);

    candidates
        .iter()
        .filter(|doc| doc.profile.role == Some(viewer_role.opposite()))
        .filter(|doc| match policy.domain_rule {
            DomainRule::Compatible => viewer_domains.accepts(&doc.profile),
            DomainRule::Any => true,
        })
        .filter(|doc| passes_filters(&doc.profile, filters))
        .collect()
}

/// Lower-cased domains of the viewer, computed once per call.
enum ViewerDomains {
    /// A student's own domain (empty when not declared)
    Student(String),
    /// A company's non-empty sought domains
    Company(Vec<String>),
}

impl ViewerDomains {
    fn new(viewer: &Viewer, role: Role) -> Self {
        match role {
            Role::Student => Self::Student(viewer.domain.to_lowercase()),
            Role::Company => Self::Company(
                viewer
                    .alternants
                    .iter()
                    .filter(|alt| !alt.domain.is_empty())
                    .map(|alt| alt.domain.to_lowercase())
                    .collect(),
            ),
        }
    }

    fn accepts(&self, candidate: &UserProfile) -> bool {
        match self {
            Self::Student(domain) => {
                !domain.is_empty()
                    && candidate
                        .alternants
                        .iter()
                        .any(|alt| alt.domain.to_lowercase() == *domain)
            }
            Self::Company(domains) => {
                !candidate.domain.is_empty()
                    && domains.contains(&candidate.domain.to_lowercase())
            }
        }
    }
}

fn passes_filters(candidate: &UserProfile, filters: &MatchFilters) -> bool {
    matches_query(candidate, &filters.query)
        && matches_domain_filter(candidate, &filters.domain)
        && matches_location_filter(candidate, &filters.location)
}

/// Case-insensitive substring search over the card's text fields.
/// A blank query matches everything.
fn matches_query(candidate: &UserProfile, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    [
        &candidate.first_name,
        &candidate.last_name,
        &candidate.company_name,
        &candidate.domain,
        &candidate.description,
        &candidate.address,
        &candidate.city,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_domain_filter(candidate: &UserProfile, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    candidate.domain.to_lowercase().contains(&needle)
        || candidate
            .alternants
            .iter()
            .any(|alt| alt.domain.to_lowercase().contains(&needle))
}

/// City is compared case-insensitively; the postal code against the raw
/// filter text.
fn matches_location_filter(candidate: &UserProfile, filter: &str) -> bool {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    candidate.city.to_lowercase().contains(&needle) || candidate.postal_code.contains(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::SoughtProfile;

    fn company(key: &str, name: &str, domains: &[&str]) -> UserDocument {
        UserDocument::new(
            key,
            UserProfile {
                role: Some(Role::Company),
                company_name: name.to_string(),
                alternants: domains
                    .iter()
                    .map(|d| SoughtProfile::new("Master", *d))
                    .collect(),
                ..Default::default()
            },
        )
    }

    fn student(key: &str, first_name: &str, domain: &str) -> UserDocument {
        UserDocument::new(
            key,
            UserProfile {
                role: Some(Role::Student),
                first_name: first_name.to_string(),
                domain: domain.to_string(),
                ..Default::default()
            },
        )
    }

    fn keys(matched: Vec<&UserDocument>) -> Vec<&str> {
        matched.into_iter().map(|doc| doc.key.as_str()).collect()
    }

    #[test]
    fn test_student_sees_company_seeking_same_domain() {
        let candidates = vec![
            company("c1", "Acme", &["marketing"]),
            company("c2", "Globex", &["RH"]),
        ];
        let viewer = Viewer::student("Marketing");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert_eq!(keys(matched), vec!["c1"]);
    }

    #[test]
    fn test_domain_comparison_ignores_case() {
        let candidates = vec![company("c1", "Acme", &["web"])];
        let viewer = Viewer::student("Web");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_domain_comparison_is_exact() {
        let candidates = vec![
            company("c1", "Acme", &["web design"]),
            company("c2", "Initech", &[" web"]),
        ];
        let viewer = Viewer::student("web");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert!(matched.is_empty());
    }

    #[test]
    fn test_student_without_domain_sees_nobody() {
        let candidates = vec![
            company("c1", "Acme", &["web"]),
            company("c2", "Globex", &[""]),
        ];
        let viewer = Viewer::student("");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert!(matched.is_empty());
    }

    #[test]
    fn test_company_sees_students_in_sought_domains() {
        let candidates = vec![
            student("s1", "Ada", "WEB"),
            student("s2", "Grace", "rh"),
            student("s3", "Alan", ""),
        ];
        let viewer = Viewer::company(vec![
            SoughtProfile::new("BTS", "web"),
            SoughtProfile::new("Master", ""),
        ]);

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert_eq!(keys(matched), vec!["s1"]);
    }

    #[test]
    fn test_company_without_sought_domains_sees_nobody() {
        let candidates = vec![student("s1", "Ada", "web"), student("s2", "Alan", "")];
        let viewer = Viewer::company(vec![SoughtProfile::new("BTS", "")]);

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert!(matched.is_empty());
    }

    #[test]
    fn test_same_role_and_unknown_role_candidates_are_excluded() {
        let mut unknown = company("u1", "Nobody", &["web"]);
        unknown.profile.role = None;
        let candidates = vec![
            student("s1", "Ada", "web"),
            unknown,
            company("c1", "Acme", &["web"]),
        ];

        for policy in [MatchPolicy::suggest(), MatchPolicy::browse()] {
            let matched = match_candidates(
                &Viewer::student("web"),
                &candidates,
                &MatchFilters::default(),
                policy,
            );
            assert_eq!(keys(matched), vec!["c1"]);
        }
    }

    #[test]
    fn test_company_viewer_excludes_companies_and_role_less_candidates() {
        let mut role_less = student("u1", "Nobody", "web");
        role_less.profile.role = None;
        let candidates = vec![
            company("c1", "Acme", &["web"]),
            role_less,
            student("s1", "Ada", "web"),
            company("c2", "Globex", &["web"]),
        ];
        let viewer = Viewer::company(vec![SoughtProfile::new("BTS", "web")]);

        for policy in [MatchPolicy::suggest(), MatchPolicy::browse()] {
            let matched =
                match_candidates(&viewer, &candidates, &MatchFilters::default(), policy);
            assert_eq!(keys(matched), vec!["s1"]);
        }
    }

    #[test]
    fn test_role_pair_grid() {
        let mut role_less = company("u1", "Nobody", &["web"]);
        role_less.profile.role = None;
        let candidates = vec![
            student("s1", "Ada", "web"),
            company("c1", "Acme", &["web"]),
            role_less,
        ];
        let viewers = [
            (Viewer::student("web"), vec!["c1"]),
            (
                Viewer::company(vec![SoughtProfile::new("Master", "web")]),
                vec!["s1"],
            ),
        ];

        for (viewer, expected) in viewers {
            for policy in [MatchPolicy::suggest(), MatchPolicy::browse()] {
                let matched =
                    match_candidates(&viewer, &candidates, &MatchFilters::default(), policy);
                assert_eq!(keys(matched), expected);
            }
        }
    }

    #[test]
    fn test_unknown_viewer_role_excludes_everyone_by_default() {
        let candidates = vec![student("s1", "Ada", "web"), company("c1", "Acme", &["web"])];
        let viewer = Viewer::default();

        for policy in [MatchPolicy::suggest(), MatchPolicy::browse()] {
            let matched = match_candidates(&viewer, &candidates, &MatchFilters::default(), policy);
            assert!(matched.is_empty());
        }
    }

    #[test]
    fn test_unknown_viewer_role_pass_through_still_applies_filters() {
        let candidates = vec![
            student("s1", "Ada", "web"),
            company("c1", "Acme", &["web"]),
            company("c2", "Globex", &["rh"]),
        ];
        let policy = MatchPolicy::browse().with_unknown_role(UnknownRolePolicy::PassThrough);

        let matched = match_candidates(
            &Viewer::default(),
            &candidates,
            &MatchFilters::browse("web", ""),
            policy,
        );

        assert_eq!(keys(matched), vec!["s1", "c1"]);
    }

    #[test]
    fn test_text_query_is_a_post_filter() {
        let candidates = vec![
            company("c1", "Marketing Corp", &["rh"]),
            company("c2", "Acme", &["marketing"]),
        ];
        let viewer = Viewer::student("marketing");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::query("corp"),
            MatchPolicy::suggest(),
        );
        assert!(matched.is_empty());

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::query("ACME"),
            MatchPolicy::suggest(),
        );
        assert_eq!(keys(matched), vec!["c2"]);
    }

    #[test]
    fn test_text_query_searches_card_fields() {
        let mut doc = company("c1", "Acme", &["web"]);
        doc.profile.description = "Agence digitale".to_string();
        doc.profile.city = "Lyon".to_string();
        let candidates = vec![doc];
        let viewer = Viewer::student("web");

        for query in ["digitale", "LYON", "acm"] {
            let matched = match_candidates(
                &viewer,
                &candidates,
                &MatchFilters::query(query),
                MatchPolicy::browse(),
            );
            assert_eq!(matched.len(), 1, "query {query:?} should match");
        }

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::query("   "),
            MatchPolicy::browse(),
        );
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_browse_filters_domain_and_location() {
        let mut paris = company("c1", "Acme", &["Développement web"]);
        paris.profile.city = "Paris".to_string();
        paris.profile.postal_code = "75011".to_string();
        let mut lyon = company("c2", "Globex", &["web"]);
        lyon.profile.city = "Lyon".to_string();
        lyon.profile.postal_code = "69003".to_string();
        let candidates = vec![paris, lyon];
        let viewer = Viewer::student("");

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::browse(" WEB ", "paris"),
            MatchPolicy::browse(),
        );
        assert_eq!(keys(matched), vec!["c1"]);

        let matched = match_candidates(
            &viewer,
            &candidates,
            &MatchFilters::browse("", "690"),
            MatchPolicy::browse(),
        );
        assert_eq!(keys(matched), vec!["c2"]);
    }

    #[test]
    fn test_order_is_preserved_and_input_untouched() {
        let candidates = vec![
            company("c3", "Three", &["web"]),
            company("c1", "One", &["web"]),
            company("c2", "Two", &["web"]),
        ];
        let snapshot = candidates.clone();

        let matched = match_candidates(
            &Viewer::student("web"),
            &candidates,
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );

        assert_eq!(keys(matched), vec!["c3", "c1", "c2"]);
        assert_eq!(candidates, snapshot);
    }

    #[test]
    fn test_empty_candidates() {
        let matched = match_candidates(
            &Viewer::student("web"),
            &[],
            &MatchFilters::default(),
            MatchPolicy::suggest(),
        );
        assert!(matched.is_empty());
    }
}
