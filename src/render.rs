use crate::models::{CatalogItem, MediaType};
use crate::recommend::SearchView;

const STYLE: &str = "body{font-family:sans-serif;margin:0;background:#1d232a;color:#a6adbb}\
header{max-width:36rem;margin:1rem auto;padding:.75rem 1rem;background:#191e24;border-radius:1rem;font-weight:700}\
form{max-width:36rem;margin:4rem auto 0;display:flex;flex-direction:column;gap:.5rem}\
.row{display:flex;gap:.5rem}.row input{flex:1}\
.grid{max-width:64rem;margin:2.5rem auto;padding:1rem;display:grid;gap:1rem;grid-template-columns:repeat(auto-fill,minmax(16rem,1fr))}\
.card{background:#191e24;border-radius:.5rem;overflow:hidden}.card img{width:100%;display:block}\
.card h2{color:#fff;font-size:1.1rem;margin:.75rem 1rem .25rem}.card p{margin:0 1rem 1rem}\
.empty{grid-column:1/-1;text-align:center;color:#6b7280}";

pub fn render_page(view: &SearchView, image_base: &str) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>Movie Pal</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n"));
    html.push_str("</head>\n<body>\n<header>Movie Pal</header>\n");
    render_form(&mut html, view);
    render_grid(&mut html, &view.items, image_base);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, view: &SearchView) {
    html.push_str("<form method=\"post\" action=\"/search\">\n<div class=\"row\">\n");
    html.push_str("<select name=\"media_type\">\n");
    for media_type in [MediaType::Movie, MediaType::Tv] {
        let selected = if media_type == view.media_type {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            media_type.as_path(),
            selected,
            media_type.label()
        ));
    }
    html.push_str("</select>\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"title\" placeholder=\"Enter Your Favorite Movie or TV Show\" value=\"{}\">\n",
        escape(&view.title)
    ));
    html.push_str("</div>\n<button type=\"submit\">Get recommendation</button>\n</form>\n");
}

fn render_grid(html: &mut String, items: &[CatalogItem], image_base: &str) {
    html.push_str("<div class=\"grid\">\n");
    if items.is_empty() {
        html.push_str("<p class=\"empty\">No recommendations found</p>\n");
    }
    for item in items {
        render_card(html, item, image_base);
    }
    html.push_str("</div>\n");
}

fn render_card(html: &mut String, item: &CatalogItem, image_base: &str) {
    let title = escape(item.display_title());
    html.push_str(&format!(
        "<div class=\"card\" data-id=\"{}\">\n",
        escape(&item.id_string())
    ));
    if let Some(src) = item.poster_url(image_base) {
        html.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{}\"></figure>\n",
            escape(&src),
            title
        ));
    }
    html.push_str(&format!("<h2>{title}</h2>\n"));
    html.push_str(&format!(
        "<p>Year: <span>{}</span></p>\n",
        escape(item.release_year().unwrap_or(""))
    ));
    html.push_str("</div>\n");
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
