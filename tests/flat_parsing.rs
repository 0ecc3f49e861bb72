use pretty_assertions::assert_eq;
use wbm_scout::{Flat, FlatError, FlatParser, LineFormat};

fn block(lines: &[&str]) -> String {
    lines.join("\n")
}

#[test]
fn full_listing_block() {
    let raw = block(&[
        "Mitte",
        "Nice 2-Room Flat",
        "Examplestr. 5, 10115 Berlin",
        "850,00€",
        "Kaltmiete",
        "65,5 m²",
        "Wohnfläche",
        "2",
        "Zimmer",
    ]);
    let flat = Flat::parse(&raw, false).unwrap();

    let value = serde_json::to_value(&flat).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "district": "Mitte",
            "title": "Nice 2-Room Flat",
            "street": "Examplestr. 5",
            "zip_code": "10115",
            "city": "Berlin",
            "total_rent": 850.0,
            "size": 65.5,
            "rooms": 2,
            "wbs": false,
            "content_hash": flat.content_hash(),
        })
    );
}

#[test]
fn parsing_is_deterministic() {
    let raw = "Mitte\nLoft\nA-Str. 1, 10115 Berlin\n1.234,50 €\n";
    assert_eq!(Flat::parse(raw, false).unwrap(), Flat::parse(raw, false).unwrap());
}

#[test]
fn later_rent_line_wins() {
    let raw = block(&["Mitte", "Loft", "1.234,50€", "999,00€"]);
    let flat = Flat::parse(&raw, false).unwrap();
    assert_eq!(flat.total_rent(), Some(999.0));
}

#[test]
fn wbs_marker_in_any_case() {
    for raw in [
        "Spandau\nWBS erforderlich",
        "Spandau\nWohnung\nnur mit wbs",
        "Spandau\nWohnung\n???\nWbS 160",
    ] {
        assert!(Flat::parse(raw, false).unwrap().wbs(), "{raw:?}");
    }
}

#[test]
fn two_line_block_has_no_optional_fields() {
    let flat = Flat::parse("Pankow\nStudio", false).unwrap();

    assert_eq!(flat.district(), "Pankow");
    assert_eq!(flat.title(), "Studio");
    assert!(flat.street().is_none() && flat.zip_code().is_none() && flat.city().is_none());
    assert!(flat.total_rent().is_none() && flat.size().is_none() && flat.rooms().is_none());
    assert!(!flat.wbs());
}

#[test]
fn too_few_lines_fail_in_both_formats() {
    for format in [LineFormat::PatternScan, LineFormat::StrictPositional] {
        let parser = FlatParser::new(format);
        assert_eq!(
            parser.parse("").unwrap_err(),
            FlatError::MalformedInput { usable_lines: 0 }
        );
        assert_eq!(
            parser.parse("Pankow\n \n").unwrap_err(),
            FlatError::MalformedInput { usable_lines: 1 }
        );
    }
}

#[test]
fn hash_is_taken_before_blank_line_filtering() {
    let raw = "\nMitte\n\n\nLoft\n\n850,00€\n";
    let stripped = FlatParser::new(LineFormat::PatternScan).parse(raw).unwrap();
    let preserved = FlatParser::new(LineFormat::PatternScan)
        .preserve_blank_lines(true)
        .parse(raw)
        .unwrap();

    assert_eq!(stripped.content_hash(), preserved.content_hash());
    assert_eq!(stripped.district(), "Mitte");
    assert_eq!(preserved.district(), "");
}

#[test]
fn whitespace_changes_identity() {
    let a = Flat::parse("Mitte\nLoft\n850,00€", false).unwrap();
    let b = Flat::parse("Mitte\nLoft\n850,00 €", false).unwrap();

    assert_eq!(a.total_rent(), b.total_rent());
    assert_ne!(a.content_hash(), b.content_hash());
}

#[test]
fn positional_format_reads_wbm_layout() {
    let raw = block(&[
        "",
        "Marzahn",
        "3 Zimmer mit Balkon",
        "Allee der Kosmonauten 10, 12681 Berlin",
        "712,34 €",
        "Gesamtmiete",
        "68,2 m²",
        "Wohnfläche",
        "3",
        "Zimmer",
    ]);
    let flat = FlatParser::new(LineFormat::StrictPositional).parse(&raw).unwrap();

    assert_eq!(flat.district(), "Marzahn");
    assert_eq!(flat.street(), Some("Allee der Kosmonauten 10"));
    assert_eq!(flat.zip_code(), Some("12681"));
    assert_eq!(flat.city(), Some("Berlin"));
    assert_eq!(flat.total_rent(), Some(712.34));
    assert_eq!(flat.size(), Some(68.2));
    assert_eq!(flat.rooms(), Some(3));
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = FlatParser::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let raw = format!("Mitte\nLoft {i}\n{i}00,00€");
                parser.parse(&raw).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let flat = handle.join().unwrap();
        assert_eq!(flat.total_rent(), Some(i as f64 * 100.0));
    }
}
