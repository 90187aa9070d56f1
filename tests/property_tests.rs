/// Property-based tests using proptest
/// Tests invariants of the website filter, lead shaping and stats
use lead_finder::models::LeadStats;
use lead_finder::places_client::places_to_leads;
use lead_finder::places_models::PlaceResult;
use lead_finder::qualification::{
    has_real_website, is_real_website, WebsiteMatch, SOCIAL_MEDIA_DOMAINS,
};
use proptest::prelude::*;

fn blocked_domain() -> impl Strategy<Value = &'static str> {
    prop::sample::select(SOCIAL_MEDIA_DOMAINS.to_vec())
}

// Property: the filter never panics and blocks every social-media value
proptest! {
    #[test]
    fn filter_never_panics(site in "\\PC*") {
        let _ = has_real_website(Some(&site));
        let _ = is_real_website(Some(&site), WebsiteMatch::Host);
    }

    #[test]
    fn blocklisted_substring_is_never_real(
        prefix in "[a-z:/.]{0,12}",
        domain in blocked_domain(),
        suffix in "[a-z/?=]{0,12}"
    ) {
        let site = format!("{}{}{}", prefix, domain, suffix);
        prop_assert!(!has_real_website(Some(&site)));
    }

    #[test]
    fn other_values_are_real(site in "[a-z]{1,12}\\.(ca|org|net|io)(/[a-z]{0,8})?") {
        prop_assume!(!SOCIAL_MEDIA_DOMAINS.iter().any(|d| site.contains(d)));
        prop_assert!(has_real_website(Some(&site)));
        prop_assert!(is_real_website(Some(&site), WebsiteMatch::Host));
    }

    #[test]
    fn subdomains_of_blocked_hosts_are_not_real(
        sub in "[a-z]{1,8}",
        domain in blocked_domain(),
        path in "[a-z]{0,8}"
    ) {
        let site = format!("https://{}.{}/{}", sub, domain, path);
        prop_assert!(!is_real_website(Some(&site), WebsiteMatch::Host));
    }
}

// Property: shaped leads are exactly the places without a real website
proptest! {
    #[test]
    fn leads_exclude_real_websites(
        sites in prop::collection::vec(
            prop_oneof![
                Just(None),
                "[a-z]{3,10}\\.ca".prop_map(Some),
                blocked_domain().prop_map(|d| Some(format!("https://{}/biz", d))),
            ],
            0..30
        )
    ) {
        let places: Vec<PlaceResult> = sites
            .iter()
            .enumerate()
            .map(|(i, site)| PlaceResult {
                place_id: format!("p{}", i),
                name: format!("Business {}", i),
                vicinity: None,
                website: site.clone(),
                geometry: None,
                types: vec![],
                rating: None,
            })
            .collect();

        let expected: Vec<String> = sites
            .iter()
            .enumerate()
            .filter(|(_, site)| !has_real_website(site.as_deref()))
            .map(|(i, _)| format!("p{}", i))
            .collect();

        let leads = places_to_leads(places, WebsiteMatch::Substring);
        let ids: Vec<String> = leads.iter().map(|l| l.place_id.clone()).collect();

        prop_assert_eq!(ids, expected);
        prop_assert!(leads.iter().all(|l| !l.has_website && l.city.is_empty()));
    }
}

// Property: stats counts always add up
proptest! {
    #[test]
    fn stats_counts_are_consistent(flags in prop::collection::vec(any::<bool>(), 0..500)) {
        let stats = LeadStats::from_flags(&flags);
        prop_assert_eq!(stats.total_leads, flags.len());
        prop_assert_eq!(stats.without_website + stats.with_website, stats.total_leads);
        prop_assert_eq!(stats.without_website, flags.iter().filter(|f| !**f).count());
        prop_assert!(stats.conversion_rate.ends_with('%'));
        if flags.is_empty() {
            prop_assert_eq!(stats.conversion_rate.as_str(), "0%");
        } else {
            let pct: f64 = stats.conversion_rate.trim_end_matches('%').parse().unwrap();
            prop_assert!((0.0..=100.0).contains(&pct));
            prop_assert_eq!(stats.conversion_rate.split('.').nth(1).map(|d| d.len()), Some(3));
        }
    }
}
