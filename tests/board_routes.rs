mod common;

use axum::http::StatusCode;

use common::{Client, assert_redirect, body_text, section};

#[tokio::test]
async fn register_login_board_and_todo_scenario() {
    let mut client = Client::new().await;
    assert_redirect(&client.register("a@x.com", "pw", "Ann").await, "/dashboards");
    client.get("/logout").await;
    assert_redirect(&client.login("a@x.com", "pw").await, "/dashboards");

    assert_redirect(
        &client.post("/add_dashboard", &[("name", "Home")]).await,
        "/dashboards",
    );
    let board_id = client.boards_of("a@x.com").await[0].id;
    let board_url = format!("/dashboard/{board_id}");

    let res = client
        .post(
            &format!("{board_url}/add_todo"),
            &[("name", "Buy milk"), ("description", ""), ("important", "y")],
        )
        .await;
    assert_redirect(&res, &board_url);

    let page = body_text(client.get(&board_url).await).await;
    assert!(section(&page, "important").contains("Buy milk"));
    assert!(!section(&page, "other").contains("Buy milk"));
    assert!(!section(&page, "completed").contains("Buy milk"));

    let todo_id = client.todos_on(&board_id).await[0].id;
    let res = client
        .post(&format!("{board_url}/complete_todo/{todo_id}"), &[])
        .await;
    assert_redirect(&res, &board_url);

    let page = body_text(client.get(&board_url).await).await;
    assert!(!section(&page, "important").contains("Buy milk"));
    assert!(!section(&page, "other").contains("Buy milk"));
    assert!(section(&page, "completed").contains("Buy milk"));
}

#[tokio::test]
async fn boards_of_other_users_are_out_of_reach() {
    let mut owner = Client::new().await;
    let board_id = owner.user_with_board("a@x.com", "Home").await;
    let board_url = format!("/dashboard/{board_id}");
    owner
        .post(&format!("{board_url}/add_todo"), &[("name", "Secret")])
        .await;
    let todo_id = owner.todos_on(&board_id).await[0].id;

    let mut intruder = Client::with_state(owner.state.clone());
    intruder.user_with_board("b@x.com", "Mine").await;

    assert_redirect(&intruder.get(&board_url).await, "/dashboards");
    assert_redirect(
        &intruder
            .post(&format!("/update_dashboard/{board_id}"), &[("name", "Pwned")])
            .await,
        "/dashboards",
    );
    assert_redirect(
        &intruder
            .post(&format!("{board_url}/add_todo"), &[("name", "Spam")])
            .await,
        "/dashboards",
    );
    assert_redirect(
        &intruder.get(&format!("{board_url}/edit_todo/{todo_id}")).await,
        "/dashboards",
    );
    assert_redirect(
        &intruder
            .post(&format!("{board_url}/complete_todo/{todo_id}"), &[])
            .await,
        "/dashboards",
    );
    assert_redirect(
        &intruder
            .post(&format!("{board_url}/delete_todo/{todo_id}"), &[])
            .await,
        "/dashboards",
    );
    assert_redirect(
        &intruder
            .post(&format!("/delete_dashboard/{board_id}"), &[])
            .await,
        "/dashboards",
    );

    let boards = owner.boards_of("a@x.com").await;
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Home");
    let todos = owner.todos_on(&board_id).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].name, "Secret");
    assert!(!todos[0].completed);

    let listing = body_text(intruder.get("/dashboards").await).await;
    assert!(listing.contains("Mine"));
    assert!(!listing.contains("Home"));
}

#[tokio::test]
async fn todo_addressed_through_another_board_is_refused() {
    let mut client = Client::new().await;
    let home = client.user_with_board("a@x.com", "Home").await;
    client
        .post("/add_dashboard", &[("name", "Work")])
        .await;
    let work = client
        .boards_of("a@x.com")
        .await
        .into_iter()
        .find(|b| b.name == "Work")
        .expect("work board")
        .id;
    client
        .post(&format!("/dashboard/{home}/add_todo"), &[("name", "Buy milk")])
        .await;
    let todo_id = client.todos_on(&home).await[0].id;

    let res = client
        .post(&format!("/dashboard/{work}/delete_todo/{todo_id}"), &[])
        .await;
    assert_redirect(&res, "/dashboards");
    assert_eq!(client.todos_on(&home).await.len(), 1);
}

#[tokio::test]
async fn toggling_twice_restores_the_todo() {
    let mut client = Client::new().await;
    let board_id = client.user_with_board("a@x.com", "Home").await;
    client
        .post(&format!("/dashboard/{board_id}/add_todo"), &[("name", "Walk dog")])
        .await;
    let todo_id = client.todos_on(&board_id).await[0].id;
    let toggle = format!("/dashboard/{board_id}/complete_todo/{todo_id}");

    client.post(&toggle, &[]).await;
    assert!(client.todos_on(&board_id).await[0].completed);

    client.post(&toggle, &[]).await;
    let todo = &client.todos_on(&board_id).await[0];
    assert!(!todo.completed);
    assert!(!todo.important);
}

#[tokio::test]
async fn editing_a_todo_updates_fields_but_not_completion() {
    let mut client = Client::new().await;
    let board_id = client.user_with_board("a@x.com", "Home").await;
    client
        .post(&format!("/dashboard/{board_id}/add_todo"), &[("name", "Draft")])
        .await;
    let todo_id = client.todos_on(&board_id).await[0].id;
    client
        .post(&format!("/dashboard/{board_id}/complete_todo/{todo_id}"), &[])
        .await;

    let edit_url = format!("/dashboard/{board_id}/edit_todo/{todo_id}");
    let form = body_text(client.get(&edit_url).await).await;
    assert!(form.contains("value=\"Draft\""));

    let res = client
        .post(
            &edit_url,
            &[
                ("name", "Final"),
                ("description", "ship it"),
                ("important", "y"),
            ],
        )
        .await;
    assert_redirect(&res, &format!("/dashboard/{board_id}"));

    let todo = &client.todos_on(&board_id).await[0];
    assert_eq!(todo.name, "Final");
    assert_eq!(todo.description.as_deref(), Some("ship it"));
    assert!(todo.important);
    assert!(todo.completed);
}

#[tokio::test]
async fn blank_todo_name_rerenders_the_form() {
    let mut client = Client::new().await;
    let board_id = client.user_with_board("a@x.com", "Home").await;

    let res = client
        .post(
            &format!("/dashboard/{board_id}/add_todo"),
            &[("name", "   "), ("description", "keep me")],
        )
        .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_text(res).await;
    assert!(page.contains("Todo name is required"));
    assert!(page.contains("keep me"));
    assert!(client.todos_on(&board_id).await.is_empty());
}

#[tokio::test]
async fn deleting_a_board_keeps_the_session_and_other_boards() {
    let mut client = Client::new().await;
    let home = client.user_with_board("a@x.com", "Home").await;
    client.post("/add_dashboard", &[("name", "Work")]).await;
    client
        .post(&format!("/dashboard/{home}/add_todo"), &[("name", "Buy milk")])
        .await;

    let res = client.post(&format!("/delete_dashboard/{home}"), &[]).await;
    assert_redirect(&res, "/dashboards");

    let res = client.get("/dashboards").await;
    assert_eq!(res.status(), StatusCode::OK);
    let listing = body_text(res).await;
    assert!(listing.contains("Work"));
    assert!(!listing.contains("Home"));
    assert!(client.todos_on(&home).await.is_empty());
}

#[tokio::test]
async fn renaming_a_board_returns_to_it() {
    let mut client = Client::new().await;
    let board_id = client.user_with_board("a@x.com", "Home").await;

    let res = client
        .post(&format!("/update_dashboard/{board_id}"), &[("name", "House")])
        .await;
    assert_redirect(&res, &format!("/dashboard/{board_id}"));
    assert_eq!(client.boards_of("a@x.com").await[0].name, "House");
}

#[tokio::test]
async fn unknown_or_malformed_ids_are_not_found() {
    let mut client = Client::new().await;
    let board_id = client.user_with_board("a@x.com", "Home").await;

    assert_eq!(
        client.get("/dashboard/not-a-uuid").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .get("/dashboard/67e55044-10b1-426f-9247-bb680e5fe0c8")
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        client
            .post(
                &format!("/dashboard/{board_id}/complete_todo/67e55044-10b1-426f-9247-bb680e5fe0c8"),
                &[],
            )
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn stylesheet_is_served_from_static() {
    let mut client = Client::new().await;

    let res = client.get("/static/style.css").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains(".todo"));
}
