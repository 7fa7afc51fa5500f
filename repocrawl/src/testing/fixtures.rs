//! Page fixtures mirroring the site's markup.

use std::fmt::Write;

/// Builds a search results page listing `urls`.
///
/// Each result carries its metadata in an entity-escaped `data-hydro-click`
/// attribute, the way the live site renders it.
#[must_use]
pub fn search_page<S: AsRef<str>>(urls: &[S]) -> String {
    let mut page = String::from("<html><body><ul class=\"repo-list\">\n");

    for (i, url) in urls.iter().enumerate() {
        let url = url.as_ref();
        write!(
            page,
            "<li class=\"repo-list-item\"><a class=\"v-align-middle\" \
             data-hydro-click=\"{{&quot;event_type&quot;:&quot;search_result.click&quot;,\
             &quot;payload&quot;:{{&quot;page_number&quot;:1,&quot;result_position&quot;:{},\
             &quot;model_name&quot;:&quot;Repository&quot;,&quot;url&quot;:&quot;{}&quot;}},\
             &quot;client_id&quot;:&quot;1102215342.1532969344&quot;}}\" href=\"{}\">result</a></li>\n",
            i + 1,
            url,
            url
        )
        .ok();
    }

    page.push_str("</ul></body></html>\n");
    page
}

/// Builds a repository landing page whose language bar lists `languages`.
#[must_use]
pub fn repository_page(languages: &[(&str, f64)]) -> String {
    let mut page = String::from(
        "<html><body><div class=\"BorderGrid-cell\">\n<h2 class=\"h4 mb-3\">Languages</h2>\n\
         <span data-view-component=\"true\" class=\"Progress\">\n",
    );

    for (name, percent) in languages {
        writeln!(
            page,
            "<span style=\"background-color:#4F5D95 !important;width: {percent}%;\" \
             itemprop=\"keywords\" aria-label=\"{name} {percent}\" data-view-component=\"true\" \
             class=\"Progress-item color-bg-success-emphasis\"></span>\
             <span class=\"language-color\" aria-label=\"{name} {percent}%\"></span>"
        )
        .ok();
    }

    page.push_str("</span>\n</div></body></html>\n");
    page
}
