use lyrical_ae_rs::config::DEFAULT_LRC;
use lyrical_ae_rs::parser::parse_lrc;

#[test]
fn test_parse_bundled_demo_lyrics() {
    let lines = parse_lrc(DEFAULT_LRC);

    // 元数据标签被丢弃，37 个带时间戳的歌词行全部保留
    assert_eq!(lines.len(), 37);
    assert!(lines[0].text.contains("世末歌者"));
    assert_eq!(lines[0].timestamp_secs, 0.0);
    assert_eq!(lines.last().unwrap().text, "不存在刹那的奇迹");
    assert!((lines.last().unwrap().timestamp_secs - 191.2).abs() < 1e-9);
}

#[test]
fn test_parsed_sequence_is_always_sorted() {
    let shuffled = "[02:00.00]c\n[00:30.00]a\n[01:00.00]b\n[00:30.00]a2";
    let lines = parse_lrc(shuffled);

    for pair in lines.windows(2) {
        assert!(pair[0].timestamp_secs <= pair[1].timestamp_secs);
    }
    // 相同时间戳保持输入顺序
    assert_eq!(lines[0].text, "a");
    assert_eq!(lines[1].text, "a2");
}

#[test]
fn test_reparsing_reconstructed_text_round_trips() {
    let first = parse_lrc(DEFAULT_LRC);
    let reconstructed: String = first
        .iter()
        .map(|l| format!("{}{}\n", l.time_tag, l.text))
        .collect();
    let second = parse_lrc(&reconstructed);

    let before: Vec<(f64, &str)> = first.iter().map(|l| (l.timestamp_secs, l.text.as_str())).collect();
    let after: Vec<(f64, &str)> = second.iter().map(|l| (l.timestamp_secs, l.text.as_str())).collect();
    assert_eq!(before, after);
}

#[test]
fn test_mixed_fraction_widths() {
    let lines = parse_lrc("[00:01.500]three\n[00:02.50]two");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].timestamp_secs, 1.5);
    assert_eq!(lines[1].timestamp_secs, 2.5);
}

#[test]
fn test_crlf_input() {
    let lines = parse_lrc("[00:01.00]one\r\n[00:02.00]two\r\n");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "one");
    assert_eq!(lines[1].text, "two");
}
