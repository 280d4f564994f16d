// GraphQL documents sent to the WordPress endpoint.
//
// The page query lists one inline fragment per built-in block type. Sites
// with a different ACF schema point `source.page_query` at their own
// document; it must accept a `$slug: String!` variable and return the same
// `pageBy { title content acf { blocks } }` shape.
//
// Blocks come back tagged with their GraphQL type name (`AcfPrimaryBanner`);
// the provider maps that to the registry tag (`primary-banner`).

/// All page URIs
pub const LIST_PAGES: &str = r#"
query ListPages {
  pages(first: 1000) {
    nodes {
      uri
    }
  }
}
"#;

/// One page and its ACF blocks, looked up by URI
pub const PAGE_BY_SLUG: &str = r#"
query GetPageBySlug($slug: String!) {
  pageBy(uri: $slug) {
    title
    content
    acf {
      blocks {
        __typename
        ... on AcfHeader {
          title
          subtitle
        }
        ... on AcfPrimaryBanner {
          heading
          text
          image_url
          cta_label
          cta_url
        }
        ... on AcfSecondaryBanner {
          heading
          text
          image_url
        }
        ... on AcfContent {
          body
        }
        ... on AcfFooter {
          text
          links {
            label
            url
          }
        }
      }
    }
  }
}
"#;
