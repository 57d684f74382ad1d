//! Markup for cards, the preview overlay and status messages

use super::format::display_date;
use crate::config::FeedConfig;
use crate::content::PostRecord;

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<img>` with a fallback to the default asset when the image fails to load
fn image_tag(config: &FeedConfig, post: &PostRecord, lazy: bool) -> String {
    let src = config.image_src(post.image.as_deref());
    let fallback = html_escape(&config.default_image_src());
    format!(
        r#"<img src="{}" alt="{}"{} onerror="this.onerror=null;this.src='{}'" />"#,
        html_escape(&src),
        html_escape(&post.title),
        if lazy { r#" loading="lazy""# } else { "" },
        fallback
    )
}

fn category_label(post: &PostRecord, fallback: &str) -> String {
    post.category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(fallback)
        .to_uppercase()
}

fn author_name<'a>(post: &'a PostRecord, config: &'a FeedConfig) -> &'a str {
    post.author
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(config.author_fallback.as_str())
}

/// A single post card, marked `new` for the entrance transition
pub fn card_html(post: &PostRecord, config: &FeedConfig) -> String {
    let author = author_name(post, config);
    let initial: String = author.chars().take(1).collect();

    format!(
        r#"<article class="post-card new" data-id="{id}">
    <div class="post-thumb">{image}</div>
    <div class="post-info">
        <div class="post-meta">
            <span class="pill">{category}</span>
            <span class="muted">{date}</span>
        </div>
        <h3 class="post-title">{title}</h3>
        <p class="post-excerpt">{excerpt}</p>
        <div class="post-footer">
            <div class="author-info">
                <div class="author-avatar">{initial}</div>
                <span class="author-name">{author}</span>
            </div>
            <div class="post-actions">
                <button class="btn-preview">{preview}</button>
                <a href="{url}" class="btn-read-more">{read}</a>
            </div>
        </div>
    </div>
</article>
"#,
        id = html_escape(&post.id),
        image = image_tag(config, post, true),
        category = html_escape(&category_label(post, &config.card_category_fallback)),
        date = html_escape(&display_date(&post.date, &config.locale)),
        title = html_escape(&post.title),
        excerpt = html_escape(&post.excerpt),
        initial = html_escape(&initial),
        author = html_escape(author),
        preview = html_escape(&config.messages.preview),
        url = html_escape(&post.url),
        read = html_escape(&config.messages.read),
    )
}

/// Cards for a batch of posts
pub fn cards_html(posts: &[&PostRecord], config: &FeedConfig) -> String {
    posts.iter().map(|post| card_html(post, config)).collect()
}

/// Body of the preview overlay
pub fn overlay_html(post: &PostRecord, config: &FeedConfig) -> String {
    format!(
        r#"<div class="modal-scroll-area">
    <div class="modal-header-hero">{image}</div>
    <div class="modal-content-body">
        <span class="modal-category">{category}</span>
        <h2 class="modal-title">{title}</h2>
        <div class="modal-meta-bar">
            <div class="author-info"><span class="author-name">{author}</span></div>
            <span>•</span>
            <span>{date}</span>
        </div>
        <p class="modal-preview-text">{excerpt}</p>
        <div class="modal-footer-actions">
            <a href="{url}" class="btn btn-primary">{read_full}</a>
        </div>
    </div>
</div>
"#,
        image = image_tag(config, post, false),
        category = html_escape(&category_label(post, &config.overlay_category_fallback)),
        title = html_escape(&post.title),
        author = html_escape(author_name(post, config)),
        date = html_escape(&display_date(&post.date, &config.locale)),
        excerpt = html_escape(&post.excerpt),
        url = html_escape(&post.url),
        read_full = html_escape(&config.messages.read_full),
    )
}

/// Error panel shown in place of the grid
pub fn message_html(title: &str, message: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!(r#"<p class="feed-error-detail">{}</p>"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<div class="feed-error"><h3>{}</h3><p>{}</p>{}</div>"#,
        html_escape(title),
        html_escape(message),
        detail
    )
}

/// Placeholder for an empty result set
pub fn empty_html(message: &str) -> String {
    format!(r#"<div class="feed-empty">{}</div>"#, html_escape(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn post() -> PostRecord {
        PostRecord {
            id: "guia-react".to_string(),
            url: "entradas-blog/guia-react.html".to_string(),
            title: "Guía de <React>".to_string(),
            excerpt: "Componentes & hooks".to_string(),
            date: "2024-01-05".to_string(),
            category: Some("tutorial".to_string()),
            author: None,
            image: Some("img/react.png".to_string()),
            tags: vec!["react".to_string()],
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_card_contents() {
        let config = FeedConfig::default();
        let html = card_html(&post(), &config);

        assert!(html.contains(r#"class="post-card new" data-id="guia-react""#));
        assert!(html.contains("Guía de &lt;React&gt;"));
        assert!(html.contains("Componentes &amp; hooks"));
        assert!(html.contains("TUTORIAL"));
        assert!(html.contains("5 de enero de 2024"));
        assert!(html.contains(r#"src="../img/react.png""#));
        assert!(html.contains("this.src='../assets/hero-home.png'"));
        assert!(html.contains(r#"<span class="author-name">Ángel</span>"#));
        assert!(html.contains(r#"<div class="author-avatar">Á</div>"#));
        assert!(html.contains(r#"href="entradas-blog/guia-react.html""#));
    }

    #[test]
    fn test_card_fallbacks() {
        let config = FeedConfig::default();
        let mut post = post();
        post.category = None;
        post.image = None;
        post.date = "pronto".to_string();

        let html = card_html(&post, &config);
        assert!(html.contains("VARIOS"));
        assert!(html.contains(r#"src="../assets/hero-home.png""#));
        assert!(html.contains(r#"<span class="muted">pronto</span>"#));
    }

    #[test]
    fn test_overlay_fallbacks() {
        let config = FeedConfig::default();
        let mut post = post();
        post.category = None;
        post.author = Some("Lucía".to_string());

        let html = overlay_html(&post, &config);
        assert!(html.contains("ENTRADA"));
        assert!(html.contains("Lucía"));
        assert!(html.contains(&config.messages.read_full));
    }

    #[test]
    fn test_message_html() {
        let html = message_html("Problema", "Falló", Some("HTTP error: 404"));
        assert!(html.contains("Problema"));
        assert!(html.contains("HTTP error: 404"));
        assert!(!message_html("a", "b", None).contains("feed-error-detail"));
    }
}
