//! Integration tests for the resource services.

mod common;

use chrono::{TimeZone, Utc};
use common::*;
use integrations_github_rest::{
    Context, CreatePullParams, IssueState, IssuesFilter, PaginationParams, Permission,
    PullsFilter, Qualifier, RateGroup, ReleaseParams, SearchOrder, SearchQuery, SearchSort,
    StateFilter, UpdatePullParams,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn user_json(login: &str, id: u64) -> serde_json::Value {
    json!({
        "login": login,
        "id": id,
        "url": format!("https://api.github.com/users/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "type": "User",
        "site_admin": false
    })
}

fn release_json() -> serde_json::Value {
    json!({
        "id": 1,
        "tag_name": "v1.0.0",
        "target_commitish": "main",
        "name": "v1.0.0",
        "draft": false,
        "prerelease": false,
        "body": "Description of the release",
        "url": "https://api.github.com/repos/octocat/Hello-World/releases/1",
        "upload_url": "https://uploads.github.com/repos/octocat/Hello-World/releases/1/assets{?name,label}",
        "created_at": "2020-10-20T20:00:00Z",
        "published_at": "2020-10-20T20:00:00Z",
        "author": user_json("octocat", 1),
        "assets": []
    })
}

fn pull_json(number: u64, state: &str) -> serde_json::Value {
    json!({
        "id": number,
        "number": number,
        "state": state,
        "draft": false,
        "title": "Amazing new feature",
        "body": "Please pull these awesome changes in!",
        "user": user_json("octocat", 1),
        "base": {"label": "octocat:main", "ref": "main", "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"},
        "head": {"label": "octocat:new-topic", "ref": "new-topic", "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"},
        "merged": false,
        "mergeable": null,
        "created_at": "2020-10-10T10:00:00Z"
    })
}

#[tokio::test]
async fn test_users_get() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(json_ok(user_json("octocat", 1)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (user, response) = client
        .users()
        .get(&Context::background(), "octocat")
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.user_type, "User");
    assert_eq!(response.rate.unwrap().remaining, 59);
}

#[tokio::test]
async fn test_repo_get() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(json_ok(json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "owner": user_json("octocat", 1),
            "private": false,
            "description": "This your first repo!",
            "default_branch": "main",
            "topics": ["octocat", "api"],
            "visibility": "public",
            "pushed_at": "2020-10-31T14:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (repo, _) = client
        .repo("octocat", "Hello-World")
        .get(&Context::background())
        .await
        .unwrap();

    assert_eq!(repo.full_name, "octocat/Hello-World");
    assert_eq!(repo.owner.login, "octocat");
    assert_eq!(repo.topics, vec!["octocat", "api"]);
    assert_eq!(
        repo.pushed_at,
        Some(Utc.with_ymd_and_hms(2020, 10, 31, 14, 0, 0).unwrap())
    );
}

#[tokio::test]
async fn test_repo_permission() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/collaborators/octodog/permission"))
        .respond_with(json_ok(json!({
            "permission": "admin",
            "user": user_json("octodog", 2)
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (permission, _) = client
        .repo("octocat", "Hello-World")
        .permission(&Context::background(), "octodog")
        .await
        .unwrap();

    assert_eq!(permission, Permission::Admin);
}

#[tokio::test]
async fn test_repo_commit_and_branch() {
    let server = setup_mock_server().await;
    let commit = json!({
        "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
        "commit": {
            "message": "Fix all the bugs",
            "author": {"name": "The Octocat", "email": "octocat@github.com", "date": "2020-10-20T19:59:59Z"},
            "committer": {"name": "The Octocat", "email": "octocat@github.com", "date": "2020-10-20T19:59:59Z"},
            "tree": {"sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e", "url": ""}
        },
        "author": user_json("octocat", 1),
        "committer": null,
        "parents": [{"sha": "553c2077f0edc3d5dc5d17262f6aa498e69d6f8e", "url": ""}]
    });

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/commits/main"))
        .respond_with(json_ok(commit.clone()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/branches/main"))
        .respond_with(json_ok(json!({
            "name": "main",
            "protected": true,
            "commit": commit
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let repo = client.repo("octocat", "Hello-World");

    let (commit, _) = repo.commit(&ctx, "main").await.unwrap();
    assert_eq!(commit.commit.message, "Fix all the bugs");
    assert_eq!(commit.parents.len(), 1);
    assert!(commit.committer.is_none());

    let (branch, _) = repo.branch(&ctx, "main").await.unwrap();
    assert!(branch.protected);
    assert_eq!(branch.commit.sha, commit.sha);
}

#[tokio::test]
async fn test_repo_disable_branch_protection() {
    let server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/Hello-World/branches/main/protection/enforce_admins"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .repo("octocat", "Hello-World")
        .set_branch_protection(&Context::background(), "main", false)
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 204);
}

#[tokio::test]
async fn test_repo_zip_archive() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/zipball/v1.0.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut sink: Vec<u8> = Vec::new();
    client
        .repo("octocat", "Hello-World")
        .download_zip_archive(&Context::background(), "v1.0.0", &mut sink)
        .await
        .unwrap();

    assert_eq!(sink, b"PK\x03\x04".to_vec());
}

#[tokio::test]
async fn test_pulls_get_and_list() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/pulls/1347"))
        .respond_with(json_ok(pull_json(1347, "open")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/pulls"))
        .and(query_param("state", "closed"))
        .and(query_param("per_page", "10"))
        .and(query_param("page", "2"))
        .respond_with(json_ok(json!([pull_json(1, "closed"), pull_json(2, "closed")])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let pulls = client.repo("octocat", "Hello-World").pulls();

    let (pull, _) = pulls.get(&ctx, 1347).await.unwrap();
    assert_eq!(pull.number, 1347);
    assert_eq!(pull.head.ref_name, "new-topic");
    assert!(pull.mergeable.is_none());

    let filter = PullsFilter {
        state: Some(StateFilter::Closed),
    };
    let (list, response) = pulls
        .list(&ctx, PaginationParams::new().per_page(10).page(2), &filter)
        .await
        .unwrap();
    let numbers: Vec<u64> = list.iter().map(|p| p.number).collect();
    assert_eq!(numbers, vec![1, 2]);
    assert_eq!(response.pages.next, Some(2));
}

#[tokio::test]
async fn test_pulls_create_and_update() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/pulls"))
        .and(body_json(json!({
            "title": "Amazing new feature",
            "head": "new-topic",
            "base": "main",
            "body": "Please pull these awesome changes in!",
            "draft": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(pull_json(1347, "open")))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/repos/octocat/Hello-World/pulls/1347"))
        .and(body_json(json!({"state": "closed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(pull_json(1347, "closed")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let pulls = client.repo("octocat", "Hello-World").pulls();

    let params = CreatePullParams {
        title: "Amazing new feature".to_string(),
        head: "new-topic".to_string(),
        base: "main".to_string(),
        body: Some("Please pull these awesome changes in!".to_string()),
        draft: false,
    };
    let (created, response) = pulls.create(&ctx, &params).await.unwrap();
    assert_eq!(created.state, "open");
    assert_eq!(response.status.as_u16(), 201);

    let update = UpdatePullParams {
        state: Some(IssueState::Closed),
        ..Default::default()
    };
    let (updated, _) = pulls.update(&ctx, 1347, &update).await.unwrap();
    assert_eq!(updated.state, "closed");
}

#[tokio::test]
async fn test_issues_list_with_filter() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/issues"))
        .and(query_param("state", "all"))
        .and(query_param("since", "2020-10-20T20:00:00Z"))
        .respond_with(json_ok(json!([
            {
                "id": 1,
                "number": 1001,
                "state": "open",
                "title": "Found a bug",
                "user": user_json("octocat", 1),
                "labels": [{"id": 2000, "name": "bug", "default": true}],
                "milestone": {"id": 3000, "number": 1, "state": "open", "title": "v1.0"},
                "pull_request": null
            },
            {
                "id": 2,
                "number": 1002,
                "state": "closed",
                "title": "Fixed a bug",
                "user": user_json("octodog", 2),
                "pull_request": {"url": "https://api.github.com/repos/octocat/Hello-World/pulls/1002"}
            }
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = IssuesFilter {
        state: Some(StateFilter::All),
        since: Some(reset_time()),
    };
    let (issues, _) = client
        .repo("octocat", "Hello-World")
        .issues()
        .list(&Context::background(), PaginationParams::new(), &filter)
        .await
        .unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].labels[0].name, "bug");
    assert_eq!(issues[0].milestone.as_ref().unwrap().title, "v1.0");
    assert!(!issues[0].is_pull_request());
    assert!(issues[1].is_pull_request());
}

#[tokio::test]
async fn test_issue_events() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/issues/1001/events"))
        .respond_with(json_ok(json!([
            {"id": 1, "event": "closed", "actor": user_json("octocat", 1), "created_at": "2020-10-20T20:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (events, _) = client
        .repo("octocat", "Hello-World")
        .issues()
        .events(&Context::background(), 1001, PaginationParams::new())
        .await
        .unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event, "closed");
    assert_eq!(events[0].created_at, Some(reset_time()));
}

#[tokio::test]
async fn test_releases() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/releases/tags/v1.0.0"))
        .respond_with(json_ok(release_json()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/releases"))
        .respond_with(json_ok(json!([release_json()])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/releases"))
        .and(body_json(json!({
            "name": "v1.0.0",
            "tag_name": "v1.0.0",
            "target_commitish": "main",
            "draft": false,
            "prerelease": false,
            "body": "Description of the release"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(release_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let releases = client.repo("octocat", "Hello-World").releases();

    let (release, _) = releases.get_by_tag(&ctx, "v1.0.0").await.unwrap();
    assert_eq!(release.id, 1);
    assert_eq!(release.target, "main");
    assert_eq!(release.author.unwrap().login, "octocat");

    let (list, _) = releases.list(&ctx, PaginationParams::new()).await.unwrap();
    assert_eq!(list.len(), 1);

    let params = ReleaseParams {
        name: "v1.0.0".to_string(),
        tag_name: "v1.0.0".to_string(),
        target: Some("main".to_string()),
        draft: false,
        prerelease: false,
        body: Some("Description of the release".to_string()),
    };
    let (created, response) = releases.create(&ctx, &params).await.unwrap();
    assert_eq!(created.tag_name, "v1.0.0");
    assert_eq!(response.status.as_u16(), 201);
}

#[tokio::test]
async fn test_release_download_asset() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/octocat/Hello-World/releases/download/v1.0.0/app.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"zip-bytes".to_vec()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut sink: Vec<u8> = Vec::new();
    client
        .repo("octocat", "Hello-World")
        .releases()
        .download_asset(&Context::background(), "v1.0.0", "app.zip", &mut sink)
        .await
        .unwrap();

    assert_eq!(sink, b"zip-bytes".to_vec());
}

#[tokio::test]
async fn test_search_issues_query_parameters() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", r#""Fix" NOT "WIP" type:pr in:title -label:"wontfix""#))
        .and(query_param("sort", "comments"))
        .and(query_param("order", "desc"))
        .and(query_param("per_page", "10"))
        .and(query_param("page", "1"))
        .respond_with(with_rate(
            ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 40,
                "incomplete_results": false,
                "items": [{"id": 1, "number": 1001, "state": "open", "title": "Fix login"}]
            })),
            29,
            30,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = SearchQuery::new()
        .include_keywords(["Fix"])
        .exclude_keywords(["WIP"])
        .include_qualifiers([Qualifier::TypePr, Qualifier::InTitle])
        .exclude_qualifiers([Qualifier::label("wontfix")]);

    let (result, response) = client
        .search()
        .issues(
            &Context::background(),
            PaginationParams::new().per_page(10).page(1),
            Some(SearchSort::Comments),
            Some(SearchOrder::Desc),
            &query,
        )
        .await
        .unwrap();

    assert_eq!(result.total_count, 40);
    assert_eq!(result.items[0].title, "Fix login");
    assert_eq!(response.rate.unwrap().group, RateGroup::Search);
}

#[tokio::test]
async fn test_search_users_and_repos() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "type:user language:rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [user_json("octocat", 1)]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "topic:api"))
        .and(query_param("sort", "stars"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "incomplete_results": true,
            "items": [{"id": 1296269, "name": "Hello-World", "full_name": "octocat/Hello-World"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ctx = Context::background();
    let search = client.search();

    let query = SearchQuery::new().include_qualifiers([Qualifier::TypeUser, Qualifier::language("rust")]);
    let (users, _) = search
        .users(&ctx, PaginationParams::new(), None, None, &query)
        .await
        .unwrap();
    assert_eq!(users.items[0].login, "octocat");

    let query = SearchQuery::new().include_qualifiers([Qualifier::topic("api")]);
    let (repos, _) = search
        .repos(&ctx, PaginationParams::new(), Some(SearchSort::Stars), None, &query)
        .await
        .unwrap();
    assert!(repos.incomplete_results);
    assert_eq!(repos.items[0].full_name, "octocat/Hello-World");
}
