//! GraphQL documents for every backend operation.
//!
//! Each document aliases its root field to `result` so responses decode
//! through one [`Rooted`](crate::envelope::Rooted) wrapper. Fragments are
//! appended per document; a fragment is only included where it is spread.

/// A named GraphQL document.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
  pub name:     &'static str,
  pub document: &'static str,
}

// ─── Fragments ───────────────────────────────────────────────────────────────

macro_rules! publication_fields {
  () => {
    "
fragment PublicationFields on Publication {
  id slug name bio bioShort
  backgroundImageURL profileImageURL
  rssName rssURL websiteURL contentTypes
  shoutouts numArticles
  socials { social URL }
}"
  };
}

macro_rules! article_fields {
  () => {
    "
fragment ArticleFields on Article {
  id title articleURL imageURL date nsfw shoutouts trendiness publicationSlug
  publication { ...PublicationFields }
}"
  };
}

macro_rules! magazine_fields {
  () => {
    "
fragment MagazineFields on Magazine {
  id title date semester pdfURL imageURL nsfw shoutouts trendiness publicationSlug
  publication { ...PublicationFields }
}"
  };
}

macro_rules! organization_fields {
  () => {
    "
fragment OrganizationFields on Organization {
  id slug name categorySlug bio
  backgroundImageURL profileImageURL websiteURL shoutouts
}"
  };
}

macro_rules! flyer_fields {
  () => {
    "
fragment FlyerFields on Flyer {
  id title startDate endDate location flyerURL imageURL categorySlug trendiness
  organizations { ...OrganizationFields }
}"
  };
}

macro_rules! article_query {
  ($name:literal, $header:literal, $root:literal) => {
    Operation {
      name:     $name,
      document: concat!(
        "query ", $name, $header, " { result: ", $root, " { ...ArticleFields } }",
        article_fields!(),
        publication_fields!(),
      ),
    }
  };
}

// ─── Articles ────────────────────────────────────────────────────────────────

pub const ALL_ARTICLES: Operation =
  article_query!("AllArticles", "($limit: Float)", "getAllArticles(limit: $limit)");

pub const TRENDING_ARTICLES: Operation = article_query!(
  "TrendingArticles",
  "($limit: Float)",
  "getTrendingArticles(limit: $limit)"
);

pub const ARTICLE_BY_ID: Operation =
  article_query!("ArticleByID", "($id: String!)", "getArticleByID(id: $id)");

pub const ARTICLES_BY_IDS: Operation =
  article_query!("ArticlesByIDs", "($ids: [String!]!)", "getArticlesByIDs(ids: $ids)");

pub const ARTICLES_BY_PUBLICATION_SLUG: Operation = article_query!(
  "ArticlesByPublicationSlug",
  "($slug: String!, $limit: Float)",
  "getArticlesByPublicationSlug(slug: $slug, limit: $limit)"
);

pub const ARTICLES_BY_PUBLICATION_SLUGS: Operation = article_query!(
  "ArticlesByPublicationSlugs",
  "($slugs: [String!]!, $limit: Float)",
  "getArticlesByPublicationSlugs(slugs: $slugs, limit: $limit)"
);

pub const SHUFFLED_ARTICLES_BY_PUBLICATION_SLUGS: Operation = article_query!(
  "ShuffledArticlesByPublicationSlugs",
  "($slugs: [String!]!, $limit: Float)",
  "getShuffledArticlesByPublicationSlugs(slugs: $slugs, limit: $limit)"
);

pub const SEARCH_ARTICLES: Operation = article_query!(
  "SearchArticles",
  "($query: String!, $limit: Float)",
  "searchArticles(query: $query, limit: $limit)"
);

pub const INCREMENT_SHOUTOUTS: Operation = Operation {
  name:     "IncrementShoutouts",
  document: "mutation IncrementShoutouts($id: String!, $uuid: String!) { \
             result: incrementShoutouts(id: $id, uuid: $uuid) { shoutouts } }",
};

pub const BOOKMARK_ARTICLE: Operation = Operation {
  name:     "BookmarkArticle",
  document: "mutation BookmarkArticle($uuid: String!) { \
             result: bookmarkArticle(uuid: $uuid) { uuid } }",
};

// ─── Publications ────────────────────────────────────────────────────────────

pub const ALL_PUBLICATIONS: Operation = Operation {
  name:     "AllPublications",
  document: concat!(
    "query AllPublications { result: getAllPublications { ...PublicationFields \
     mostRecentArticle { ...ArticleFields } } }",
    publication_fields!(),
    article_fields!(),
  ),
};

pub const PUBLICATION_BY_SLUG: Operation = Operation {
  name:     "PublicationBySlug",
  document: concat!(
    "query PublicationBySlug($slug: String!) { result: getPublicationBySlug(slug: \
     $slug) { ...PublicationFields mostRecentArticle { ...ArticleFields } } }",
    publication_fields!(),
    article_fields!(),
  ),
};

pub const FOLLOW_PUBLICATION: Operation = Operation {
  name:     "FollowPublication",
  document: "mutation FollowPublication($slug: String!, $uuid: String!) { \
             result: followPublication(slug: $slug, uuid: $uuid) { uuid \
             followedPublicationSlugs } }",
};

pub const UNFOLLOW_PUBLICATION: Operation = Operation {
  name:     "UnfollowPublication",
  document: "mutation UnfollowPublication($slug: String!, $uuid: String!) { \
             result: unfollowPublication(slug: $slug, uuid: $uuid) { uuid \
             followedPublicationSlugs } }",
};

// ─── Magazines ───────────────────────────────────────────────────────────────

macro_rules! magazine_query {
  ($name:literal, $header:literal, $root:literal) => {
    Operation {
      name:     $name,
      document: concat!(
        "query ", $name, $header, " { result: ", $root, " { ...MagazineFields } }",
        magazine_fields!(),
        publication_fields!(),
      ),
    }
  };
}

pub const ALL_MAGAZINES: Operation =
  magazine_query!("AllMagazines", "($limit: Float)", "getAllMagazines(limit: $limit)");

pub const FEATURED_MAGAZINES: Operation = magazine_query!(
  "FeaturedMagazines",
  "($limit: Float)",
  "getFeaturedMagazines(limit: $limit)"
);

pub const MAGAZINE_BY_ID: Operation =
  magazine_query!("MagazineByID", "($id: String!)", "getMagazineByID(id: $id)");

pub const INCREMENT_MAGAZINE_SHOUTOUTS: Operation = Operation {
  name:     "IncrementMagazineShoutouts",
  document: "mutation IncrementMagazineShoutouts($id: String!, $uuid: String!) { \
             result: incrementMagazineShoutouts(id: $id, uuid: $uuid) { shoutouts } }",
};

// ─── Organizations & flyers ──────────────────────────────────────────────────

pub const ALL_ORGANIZATIONS: Operation = Operation {
  name:     "AllOrganizations",
  document: concat!(
    "query AllOrganizations { result: getAllOrganizations { ...OrganizationFields } }",
    organization_fields!(),
  ),
};

macro_rules! flyer_query {
  ($name:literal, $header:literal, $root:literal) => {
    Operation {
      name:     $name,
      document: concat!(
        "query ", $name, $header, " { result: ", $root, " { ...FlyerFields } }",
        flyer_fields!(),
        organization_fields!(),
      ),
    }
  };
}

pub const FLYERS_AFTER_DATE: Operation =
  flyer_query!("FlyersAfterDate", "($since: String!)", "getFlyersAfterDate(since: $since)");

pub const FLYERS_BEFORE_DATE: Operation = flyer_query!(
  "FlyersBeforeDate",
  "($before: String!, $limit: Float)",
  "getFlyersBeforeDate(before: $before, limit: $limit)"
);

pub const TRENDING_FLYERS: Operation =
  flyer_query!("TrendingFlyers", "($limit: Float)", "getTrendingFlyers(limit: $limit)");

// ─── Users ───────────────────────────────────────────────────────────────────

pub const CREATE_USER: Operation = Operation {
  name:     "CreateUser",
  document: "mutation CreateUser($deviceToken: String!, $followedPublicationSlugs: \
             [String!]!) { result: createUser(deviceToken: $deviceToken, \
             followedPublicationSlugs: $followedPublicationSlugs) { uuid \
             followedPublicationSlugs } }",
};

pub const GET_USER: Operation = Operation {
  name:     "GetUser",
  document: concat!(
    "query GetUser($uuid: String!) { result: getUser(uuid: $uuid) { uuid \
     followedPublicationSlugs weeklyDebrief { creationDate expirationDate \
     numShoutouts numBookmarkedArticles numReadArticles numReadMagazines \
     numCreations readArticles { ...ArticleFields } randomArticles { \
     ...ArticleFields } } } }",
    article_fields!(),
    publication_fields!(),
  ),
};

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn documents_alias_root_to_result() {
    for op in [
      ALL_ARTICLES,
      ARTICLE_BY_ID,
      SEARCH_ARTICLES,
      INCREMENT_SHOUTOUTS,
      ALL_PUBLICATIONS,
      FOLLOW_PUBLICATION,
      MAGAZINE_BY_ID,
      FLYERS_AFTER_DATE,
      CREATE_USER,
      GET_USER,
    ] {
      assert!(op.document.contains("result:"), "{} lacks alias", op.name);
      assert!(op.document.contains(op.name), "{} name mismatch", op.name);
    }
  }

  #[test]
  fn spread_fragments_are_defined() {
    for op in [ALL_ARTICLES, ALL_PUBLICATIONS, ALL_MAGAZINES, TRENDING_FLYERS, GET_USER] {
      for frag in [
        "PublicationFields",
        "ArticleFields",
        "MagazineFields",
        "FlyerFields",
        "OrganizationFields",
      ] {
        if op.document.contains(&format!("...{frag}")) {
          assert!(
            op.document.contains(&format!("fragment {frag} on")),
            "{} spreads {frag} without defining it",
            op.name
          );
        }
      }
    }
  }
}
