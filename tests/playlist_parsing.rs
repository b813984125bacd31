use iptv_catalog::{parse_playlist, parse_playlist_report, ChannelCategory, PlaylistWarning};
use rstest::rstest;

fn block(name: &str, url: &str, group: &str) -> String {
    format!(
        "#EXTINF:-1 tvg-id=\"{name}.tv\" tvg-logo=\"https://logos.example/{name}.png\" group-title=\"{group}\",{name}\n{url}\n"
    )
}

#[rstest]
#[case("")]
#[case("#EXTM3U\n#EXTINF:-1,A\nhttp://a\n#EXTINF:-1,B\n")]
#[case("http://orphan\n#EXTINF:-1 group-title=\"Docs\",Doc\r\nhttps://doc\r\n")]
#[case(include_str!("fixtures/mixed.m3u"))]
fn test_parse_is_deterministic(#[case] input: &str) {
    let first = parse_playlist(input);
    for _ in 0..3 {
        assert_eq!(parse_playlist(input), first);
    }
}

#[test]
fn test_output_follows_directive_order() {
    let input = format!(
        "#EXTM3U\n{}{}{}",
        block("Zeta", "http://z", "News"),
        block("Alpha", "http://a", "Sports"),
        block("Mu", "http://m", "Music")
    );
    let names: Vec<String> = parse_playlist(&input).into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mu"]);
}

#[test]
fn test_trailing_directive_without_url_is_dropped() {
    let drafts = parse_playlist("#EXTM3U\n#EXTINF:-1,Kept\nhttp://kept\n#EXTINF:-1,Lost\n");
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].name, "Kept");
}

#[test]
fn test_orphan_url_is_ignored() {
    let drafts = parse_playlist(
        "#EXTM3U\nhttp://orphan\n#EXTINF:-1,First\nhttp://first\nhttp://second-orphan\n",
    );
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].stream_url, "http://first");
    assert!(drafts.iter().all(|d| !d.stream_url.contains("orphan")));
}

#[rstest]
#[case(Some("info-doc"), ChannelCategory::News)]
#[case(Some("random-label"), ChannelCategory::Entertainment)]
#[case(None, ChannelCategory::Entertainment)]
fn test_category_from_group_label(#[case] group: Option<&str>, #[case] expected: ChannelCategory) {
    let attrs = group
        .map(|g| format!(" group-title=\"{}\"", g))
        .unwrap_or_default();
    let input = format!("#EXTM3U\n#EXTINF:-1{},Channel\nhttp://c\n", attrs);

    let drafts = parse_playlist(&input);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].category, expected);
}

#[test]
fn test_minimal_block_round_trip() {
    let input = "#EXTM3U\n#EXTINF:-1 tvg-logo=\"https://x/logo.png\" group-title=\"Sports\",ESPN Test\nhttps://example.com/stream.m3u8\n";
    let drafts = parse_playlist(input);

    assert_eq!(drafts.len(), 1);
    let draft = &drafts[0];
    assert_eq!(draft.name, "ESPN Test");
    assert_eq!(draft.stream_url, "https://example.com/stream.m3u8");
    assert_eq!(draft.logo_url.as_deref(), Some("https://x/logo.png"));
    assert_eq!(draft.thumbnail_url.as_deref(), Some("https://x/logo.png"));
    assert_eq!(draft.category, ChannelCategory::Sports);
    assert!(draft.description.contains("Sports"));
}

#[test]
fn test_empty_input_yields_nothing() {
    assert!(parse_playlist("").is_empty());
    let report = parse_playlist_report("");
    assert!(report.drafts.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_missing_header_is_advisory() {
    let report = parse_playlist_report("#EXTINF:-1,No Header\nhttps://example.com/live.m3u8\n");
    assert_eq!(report.drafts.len(), 1);
    assert_eq!(report.warnings, vec![PlaylistWarning::MissingHeader]);
}

#[test]
fn test_ten_blocks_yield_ten_drafts() {
    let groups = ["News", "Sports", "Movies", "Music", "Docs", "Kids"];
    let mut input = String::from("#EXTM3U\n");
    for i in 0..10 {
        input.push_str(&block(
            &format!("Channel{}", i),
            &format!("https://cdn.example/{}.m3u8", i),
            groups[i % groups.len()],
        ));
    }

    let drafts = parse_playlist(&input);
    assert_eq!(drafts.len(), 10);
    for (i, draft) in drafts.iter().enumerate() {
        assert_eq!(draft.name, format!("Channel{}", i));
        assert_eq!(draft.stream_url, format!("https://cdn.example/{}.m3u8", i));
        assert_eq!(
            draft.logo_url.as_deref(),
            Some(format!("https://logos.example/Channel{}.png", i).as_str())
        );
    }
}

#[test]
fn test_mixed_fixture() {
    let report = parse_playlist_report(include_str!("fixtures/mixed.m3u"));
    let names: Vec<&str> = report.drafts.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Euronews", "Canal+ Sport", "Ciné+ Classic", "Arte"]);

    assert_eq!(report.drafts[1].category, ChannelCategory::Sports);
    assert_eq!(report.drafts[2].category, ChannelCategory::Movies);
    assert_eq!(report.drafts[3].logo_url, None);
    assert_eq!(report.drafts[3].category, ChannelCategory::Documentary);
    assert_eq!(report.extraction.orphaned_urls, 1);
    assert_eq!(report.extraction.incomplete_blocks, 1);
}
