use alma_server::models::internal::{NewMemory, NewMoodLog, NewSessionCompletion};
use alma_server::orchestrator::context_assembly::{
    render_prompt, ContextAssembler, UserContext, MEMORY_PLACEHOLDER, SESSIONS_FALLBACK,
    TECHNIQUES_FALLBACK,
};
use alma_server::storage::{init_db, SeaOrmWellnessRepository, WellnessRepository};
use std::sync::Arc;

async fn test_repo() -> Arc<SeaOrmWellnessRepository> {
    let db = init_db("sqlite::memory:").await.unwrap();
    Arc::new(SeaOrmWellnessRepository::new(db))
}

#[tokio::test]
async fn test_context_for_brand_new_user_uses_all_fallbacks() {
    let repo = test_repo().await;
    let assembler = ContextAssembler::new(repo.clone());

    let context = assembler.build_context("new-user").await.unwrap();

    assert_eq!(context.profile.display_name, "Usuário");
    assert_eq!(context.profile.language, "pt-BR");
    assert_eq!(context.profile.goals, "Não definidos");
    assert_eq!(context.memories.len(), 3);
    assert!(context.memories.iter().all(|m| m == MEMORY_PLACEHOLDER));
    assert_eq!(context.best_techniques, TECHNIQUES_FALLBACK);
    assert_eq!(context.recent_sessions, SESSIONS_FALLBACK);
    assert_eq!(context.mood_7d.sample_count, 0);

    // Lazy creation happened
    assert!(repo.find_user("new-user").await.unwrap().is_some());
}

#[tokio::test]
async fn test_memories_are_newest_first_and_padded() {
    let repo = test_repo().await;
    let assembler = ContextAssembler::new(repo.clone());

    for (i, summary) in ["primeira conversa", "segunda conversa"].iter().enumerate() {
        repo.insert_memory(NewMemory {
            user_id: "u1".to_string(),
            summary: summary.to_string(),
            tags: vec!["conversa".to_string()],
            techniques_worked: vec![],
            next_step: String::new(),
            importance: 1 + i as i32,
        })
        .await
        .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let context = assembler.build_context("u1").await.unwrap();

    assert_eq!(context.memories[0], "segunda conversa");
    assert_eq!(context.memories[1], "primeira conversa");
    assert_eq!(context.memories[2], MEMORY_PLACEHOLDER);
}

#[tokio::test]
async fn test_context_reflects_sessions_and_mood() {
    let repo = test_repo().await;
    let assembler = ContextAssembler::new(repo.clone());

    repo.insert_session(NewSessionCompletion {
        user_id: "u1".to_string(),
        session_id: "box_breathing".to_string(),
        duration_seconds: 300,
        completed: true,
        notes: String::new(),
    })
    .await
    .unwrap();

    for value in [4, 4] {
        repo.insert_mood_log(NewMoodLog {
            user_id: "u1".to_string(),
            mood_value: value,
            note: String::new(),
        })
        .await
        .unwrap();
    }

    let context = assembler.build_context("u1").await.unwrap();

    assert_eq!(context.recent_sessions, "box_breathing");
    assert_eq!(context.mood_7d.sample_count, 2);
    assert_eq!(context.mood_7d.average, 4.0);
}

#[test]
fn test_render_prompt_contains_every_placeholder_slot() {
    let context = UserContext::default();
    let prompt = render_prompt("PROMPT BASE", &context);

    assert!(prompt.starts_with("PROMPT BASE"));
    assert_eq!(prompt.matches(MEMORY_PLACEHOLDER).count(), 3);
    assert!(prompt.contains("1) Nenhuma memória"));
    assert!(prompt.contains("2) Nenhuma memória"));
    assert!(prompt.contains("3) Nenhuma memória"));
    assert!(prompt.contains("Técnicas mais eficazes: Ainda descobrindo"));
    assert!(prompt.contains("Sessões recentes: Nenhuma sessão recente"));
    assert!(prompt.contains("Humor médio (7 dias): 0/5 (sem_dados, 0 registros)"));
    assert!(prompt.contains("sem revelar dados diretamente"));
}

#[test]
fn test_render_prompt_is_pure_substitution() {
    let mut context = UserContext::default();
    context.profile.display_name = "Maria".to_string();
    context.profile.goals = "dormir melhor".to_string();
    context.memories = vec![
        "conversa sobre ansiedade".to_string(),
        "praticou 4-7-8".to_string(),
        "planejou caminhada".to_string(),
    ];
    context.best_techniques = "respiracao_4_7_8 (4.5/5)".to_string();

    let prompt = render_prompt("BASE", &context);

    assert!(prompt.contains("Perfil: Maria, idioma pt-BR, país BR"));
    assert!(prompt.contains("Objetivos: dormir melhor"));
    assert!(prompt.contains("1) conversa sobre ansiedade"));
    assert!(prompt.contains("3) planejou caminhada"));
    assert!(prompt.contains("Técnicas mais eficazes: respiracao_4_7_8 (4.5/5)"));

    // Rendering the same context twice is deterministic
    assert_eq!(prompt, render_prompt("BASE", &context));
}
