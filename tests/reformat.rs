use pretty_assertions::assert_eq;
use reformadoc::{reformat_comments, reformat_comments_with, FormatOptions, DEFAULT_WRAP_WIDTH};
use rstest::rstest;

const DIAGNOSTIC: &str = "The following comment is not valid: ";

fn narrow(width: usize) -> FormatOptions {
    FormatOptions { wrap_width: width }
}

#[test]
fn test_short_summary_collapses_to_one_line() {
    let src = "    /// <summary>\n    ///     Hello\n    ///     world.\n    /// </summary>\n    public void Foo() {}\n";
    assert_eq!(
        reformat_comments(src),
        "    /// <summary>Hello world.</summary>\n    public void Foo() {}\n"
    );
}

#[test]
fn test_long_summary_falls_back_to_block_layout() {
    let src = "/// <summary>The quick brown fox jumps over the lazy dog.</summary>";
    assert_eq!(
        reformat_comments_with(src, &narrow(40)),
        "/// <summary>\n///     The quick brown fox jumps over\n///     the lazy dog.</summary>\n"
    );
}

#[test]
fn test_quote_style_comments() {
    assert_eq!(
        reformat_comments("''' <summary>\n'''   Hi\n''' </summary>"),
        "''' <summary>Hi</summary>\n"
    );
}

#[test]
fn test_inline_tags_flow_with_text() {
    let src = "/// <summary>Use <see cref=\"Foo\"/>\n/// instead of <paramref name=\"bar\"/>.</summary>";
    assert_eq!(
        reformat_comments(src),
        "/// <summary>Use <see cref=\"Foo\"/> instead of <paramref name=\"bar\"/>.</summary>\n"
    );
}

#[test]
fn test_double_line_break_is_kept() {
    let src = "/// <summary>\n/// First paragraph.\n///\n/// Second paragraph.\n/// </summary>";
    assert_eq!(
        reformat_comments(src),
        "/// <summary>\n///     First paragraph.\n///\n///     Second paragraph.</summary>\n"
    );
}

#[test]
fn test_code_is_reproduced_verbatim() {
    let src = "/// <summary>Runs it.</summary>\n/// <example>\n///     <code>\n///         if (x)\n///             y();\n///     </code>\n/// </example>";
    assert_eq!(
        reformat_comments(src),
        "/// <summary>\n///     Runs it.</summary>\n/// <example>\n///     <code>\n///         if (x)\n///             y();</code></example>\n"
    );
}

#[test]
fn test_code_is_never_wrapped() {
    let long_statement = format!("var total = {};", vec!["value"; 40].join(" + "));
    let src = format!("/// <remarks>\n/// <code>\n/// {long_statement}\n/// </code>\n/// </remarks>");
    let out = reformat_comments(&src);
    assert!(out.contains(&format!("///         {long_statement}</code></remarks>\n")), "{out}");
}

#[test]
fn test_list_renders_items_one_per_line() {
    let src = "/// <remarks><list><item>A</item><item>B</item></list></remarks>";
    assert_eq!(
        reformat_comments(src),
        "/// <remarks>\n///     <list>\n///         <item>A</item>\n///         <item>B</item></list></remarks>\n"
    );
}

#[test]
fn test_conflicting_levels_keep_original_lines() {
    let src = "/// <summary>Hello <see cref=\"X\"/> <para>World</para></summary>\nint x;";
    assert_eq!(
        reformat_comments(src),
        format!(
            "{DIAGNOSTIC}<para> is block-level, but <see> is inline-level.\n\
             /// <summary>Hello <see cref=\"X\"/> <para>World</para></summary>\nint x;\n"
        )
    );
}

#[test]
fn test_unknown_tag_is_reported() {
    let src = "/// <summary>Hello <b>World</b></summary>";
    assert_eq!(
        reformat_comments(src),
        format!("{DIAGNOSTIC}I don't know whether <b> is inline-level or block-level.\n{src}\n")
    );
}

#[test]
fn test_raw_text_outside_tags_is_reported() {
    let src = "/// Just text";
    let out = reformat_comments(src);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(DIAGNOSTIC));
    assert_eq!(lines[1], src);
}

#[rstest]
#[case::control_character("/// <summary>a \u{1} b</summary>", "Invalid character U+0001 in comment.")]
#[case::control_character_reference("/// <summary>a &#1; b</summary>", "Invalid character U+0001 in comment.")]
#[case::undefined_entity("/// <summary>a&nbsp;b</summary>", "Reference to undefined entity &nbsp;")]
fn test_invalid_characters_and_entities_keep_original_lines(#[case] src: &str, #[case] reason: &str) {
    let src = format!("{src}\nint x;");
    assert_eq!(reformat_comments(&src), format!("{DIAGNOSTIC}{reason}\n{src}\n"));
}

#[test]
fn test_parse_failure_is_isolated_to_its_run() {
    let src = "/// <summary>Bad</summry>\nint a;\n/// <summary>\n/// Good\n/// </summary>\nint b;";
    let out = reformat_comments(src);
    let lines: Vec<_> = out.lines().collect();

    assert!(lines[0].starts_with(DIAGNOSTIC), "{out}");
    assert_eq!(
        &lines[1..],
        &["/// <summary>Bad</summry>", "int a;", "/// <summary>Good</summary>", "int b;"]
    );
}

#[test]
fn test_plain_lines_are_preserved() {
    let src = "fn main() {\r\n    let x = 1;   \r\n\r\n    // not a doc comment\r\n}\r\n\r\n";
    assert_eq!(
        reformat_comments(src),
        "fn main() {\n    let x = 1;   \n\n    // not a doc comment\n}\n"
    );
}

#[test]
fn test_adjacent_runs_of_different_kinds_are_separate() {
    let src = "/// <summary>A</summary>\n''' <summary>B</summary>";
    assert_eq!(reformat_comments(src), "/// <summary>A</summary>\n''' <summary>B</summary>\n");
}

#[test]
fn test_lines_stay_within_width() {
    let words: Vec<String> = (0..80).map(|i| format!("word{i:02}")).collect();
    let src = format!("        /// <summary>{}</summary>", words.join(" "));
    let out = reformat_comments(&src);

    assert!(out.lines().count() > 2);
    for line in out.lines() {
        assert!(line.chars().count() <= DEFAULT_WRAP_WIDTH, "too wide: {line:?}");
    }
    assert_eq!(reformat_comments(&out), out);
}

#[rstest]
#[case::summary("/// <summary>\n/// Gets the value.\n/// </summary>\npublic int Value { get; }")]
#[case::params(
    "    /// <summary>Adds <paramref name=\"a\"/> and <paramref name=\"b\"/>.</summary>\n    /// <param name=\"a\">First.</param>\n    /// <param name=\"b\">Second.</param>\n    /// <returns>The sum.</returns>\n    int Add(int a, int b);"
)]
#[case::paragraphs(
    "/// <remarks>\n/// <para>One\n/// two.</para>\n/// <para>Three &amp; four &lt;T&gt;.</para>\n/// </remarks>"
)]
#[case::list("''' <remarks>\n''' <list type=\"bullet\"><item>A</item>\n''' <item>B <c>b</c></item></list>\n''' </remarks>")]
#[case::code("/// <example>\n/// <code>\n///   foo(1);\n///     bar();\n/// </code>\n/// </example>")]
#[case::blank_line("/// <summary>\n/// a\n///\n/// b\n/// </summary>")]
#[case::blank_summary("/// <summary> </summary>")]
#[case::empty_para("/// <remarks><para> </para></remarks>")]
#[case::table_items(
    "/// <remarks><list type=\"table\"><item><term/><description/></item><item><term>T</term><description>D</description></item></list></remarks>"
)]
fn test_reformatting_is_idempotent(#[case] src: &str) {
    let once = reformat_comments(src);
    assert!(!once.contains(DIAGNOSTIC), "{once}");
    assert_eq!(reformat_comments(&once), once);
}
