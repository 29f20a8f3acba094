use crate::config::{Config, ConfigBuilder};
use crate::inline_parser::InlineParser;
use crate::renderer::HtmlRenderer;
use crate::token::{Link, Links};

fn render_with(config: Config, links: &Links, input: &str) -> String {
    let renderer = HtmlRenderer::new(config.clone());
    InlineParser::new(&config, links, &renderer)
        .output(input)
        .expect("inline output should succeed")
}

fn render(input: &str) -> String {
    render_with(Config::default(), &Links::new(), input)
}

fn reference_links() -> Links {
    let mut links = Links::new();
    links.insert(
        "Ref",
        Link {
            href: "/target".into(),
            title: Some("Title".into()),
        },
    );
    links.insert(
        "empty",
        Link {
            href: String::new(),
            title: None,
        },
    );
    links
}

mod emphasis_tests {
    use super::*;

    #[test]
    fn em_and_strong() {
        assert_eq!(render("*a* **b**"), "<em>a</em> <strong>b</strong>");
        assert_eq!(render("__b__"), "<strong>b</strong>");
    }

    #[test]
    fn escaped_stars_are_literal() {
        assert_eq!(render(r"\*not em\*"), "*not em*");
    }

    #[test]
    fn strikethrough_needs_gfm() {
        assert_eq!(render("~~gone~~"), "<del>gone</del>");
        let config = ConfigBuilder::default().gfm(false).build();
        assert_eq!(render_with(config, &Links::new(), "~~gone~~"), "~~gone~~");
    }
}

mod code_tests {
    use super::*;

    #[test]
    fn code_span_is_trimmed_and_escaped() {
        assert_eq!(render("` a < b `"), "<code>a &lt; b</code>");
    }

    #[test]
    fn code_span_encodes_entities() {
        assert_eq!(render("`&amp;`"), "<code>&amp;amp;</code>");
    }
}

mod link_tests {
    use super::*;

    #[test]
    fn inline_link_with_title() {
        assert_eq!(
            render(r#"[x](/u "T")"#),
            r#"<a href="/u" title="T">x</a>"#
        );
    }

    #[test]
    fn image_alt_is_escaped() {
        assert_eq!(
            render("![a & b](/i.png)"),
            r#"<img src="/i.png" alt="a &amp; b">"#
        );
    }

    #[test]
    fn reference_link_resolves_case_insensitively() {
        assert_eq!(
            render_with(Config::default(), &reference_links(), "[x][REF]"),
            r#"<a href="/target" title="Title">x</a>"#
        );
        assert_eq!(
            render_with(Config::default(), &reference_links(), "[Ref]"),
            r#"<a href="/target" title="Title">Ref</a>"#
        );
    }

    #[test]
    fn unresolved_reference_stays_text() {
        assert_eq!(render("[x][nope]"), "[x][nope]");
        assert_eq!(
            render_with(Config::default(), &reference_links(), "[empty]"),
            "[empty]"
        );
    }

    #[test]
    fn angle_autolink() {
        assert_eq!(
            render("<http://a.b>"),
            r#"<a href="http://a.b">http://a.b</a>"#
        );
    }

    #[test]
    fn email_autolink_without_mangling() {
        let config = ConfigBuilder::default().mangle(false).build();
        assert_eq!(
            render_with(config, &Links::new(), "<me@x.org>"),
            r#"<a href="mailto:me@x.org">me@x.org</a>"#
        );
    }

    #[test]
    fn email_autolink_is_mangled_by_default() {
        let out = render("<mailto:me@x.org>");
        assert!(out.starts_with("<a href=\"&#"), "{out}");
        assert!(!out.contains("me@x.org"), "{out}");
        assert_eq!(crate::utils::unescape(&out), r#"<a href="mailto:me@x.org">me@x.org</a>"#);
    }

    #[test]
    fn bare_url_stops_before_trailing_punctuation() {
        assert_eq!(
            render("see http://x.org."),
            r#"see <a href="http://x.org">http://x.org</a>."#
        );
    }

    #[test]
    fn no_links_inside_link_text() {
        assert_eq!(
            render("[see <http://a.b>](/u)"),
            r#"<a href="/u">see &lt;http://a.b&gt;</a>"#
        );
    }

    #[test]
    fn sanitize_drops_unsafe_href() {
        let config = ConfigBuilder::default().sanitize(true).build();
        assert_eq!(render_with(config, &Links::new(), "[x](javascript:void)"), "x");
    }
}

mod html_tests {
    use super::*;

    #[test]
    fn tags_pass_through() {
        assert_eq!(render("a <span>b</span>"), "a <span>b</span>");
    }

    #[test]
    fn sanitize_escapes_tags() {
        let config = ConfigBuilder::default().sanitize(true).build();
        assert_eq!(
            render_with(config, &Links::new(), "a <span>b</span>"),
            "a &lt;span&gt;b&lt;/span&gt;"
        );
    }

    #[test]
    fn sanitizer_hook_replaces_tags() {
        let config = ConfigBuilder::default()
            .sanitize(true)
            .sanitizer(|_| String::new())
            .build();
        assert_eq!(render_with(config, &Links::new(), "a <b>c</b>"), "a c");
    }
}

mod text_tests {
    use super::*;

    #[test]
    fn existing_entities_are_kept() {
        assert_eq!(render("AT&T &amp; co"), "AT&amp;T &amp; co");
    }

    #[test]
    fn hard_break_needs_two_spaces() {
        assert_eq!(render("a  \nb"), "a<br>b");
        assert_eq!(render("a\nb"), "a\nb");
    }

    #[test]
    fn trailing_break_is_text() {
        assert_eq!(render("a  \n"), "a  \n");
    }

    #[test]
    fn breaks_turn_every_newline_into_br() {
        let config = ConfigBuilder::default().breaks(true).xhtml(true).build();
        assert_eq!(render_with(config, &Links::new(), "a\nb"), "a<br/>b");
    }

    #[test]
    fn smartypants_in_text_only() {
        let config = ConfigBuilder::default().smartypants(true).build();
        assert_eq!(
            render_with(config, &Links::new(), "\"hi\" -- `--`"),
            "\u{201c}hi\u{201d} \u{2013} <code>--</code>"
        );
    }
}
