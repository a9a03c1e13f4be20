#![allow(missing_docs)]

pub(crate) mod api;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use html::{
    assert_valid_html, element_text, parse_html_document, parse_html_fragment, parse_markup,
    select_all, text_of,
};
pub(crate) use http::{assert_content_type, assert_status_ok};
