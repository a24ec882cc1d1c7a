use crate::constants::{OPENING_HOURS_ID, SOCIALS_ID};
use crate::core::content::SiteContent;
use crate::core::SiteResult;
use crate::dom;
use web_sys as web;

/// Fill the contact section's opening hours and social links from content.
/// Containers that are missing, or already have markup, are left alone.
pub fn render(document: &web::Document, content: &SiteContent) -> SiteResult<()> {
    if let Some(list) = dom::by_id(document, OPENING_HOURS_ID).filter(|el| el.child_element_count() == 0) {
        for entry in &content.opening_hours {
            let item = dom::create(document, "li")?;
            item.set_text_content(Some(&format!("{} : {}", entry.day, entry.time)));
            _ = list.append_child(&item);
        }
    }
    if let Some(list) = dom::by_id(document, SOCIALS_ID).filter(|el| el.child_element_count() == 0) {
        for social in &content.socials {
            let link = dom::create(document, "a")?;
            _ = link.set_attribute("href", &social.url);
            _ = link.set_attribute("target", "_blank");
            _ = link.set_attribute("rel", "noopener noreferrer");
            _ = link.set_attribute("aria-label", &social.name);
            let icon = dom::create(document, "img")?;
            _ = icon.set_attribute("src", &social.icon);
            _ = icon.set_attribute("alt", &social.name);
            _ = link.append_child(&icon);
            _ = list.append_child(&link);
        }
    }
    Ok(())
}
