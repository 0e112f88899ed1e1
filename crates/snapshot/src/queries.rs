//! GraphQL documents sent to the Snapshot hub.

use indoc::indoc;

pub const ACTIVE_PROPOSALS: &str = indoc! {r#"
    query Proposals($space: String!, $first: Int!) {
      proposals(
        first: $first,
        where: {
          space: $space,
          state: "active"
        },
        orderBy: "created",
        orderDirection: desc
      ) {
        id
        title
        choices
        start
        end
        state
        author
        created
      }
    }
"#};

pub const PROPOSAL_VOTES: &str = indoc! {r#"
    query Votes($proposal: String!, $first: Int!) {
      votes(
        first: $first,
        where: {
          proposal: $proposal
        }
      ) {
        id
        voter
        choice
        created
      }
    }
"#};
