use crate::infra::{load_catalog, parse_category_score};
use advisor::config::{AppConfig, PipelineConfig};
use advisor::error::AppError;
use advisor::workflows::catalog::EntityId;
use advisor::workflows::recommendation::{
    RecommendationItem, RecommendationPayload, RecommendationRequest, RecommendationService,
    RecommendationStores,
};
use advisor::workflows::roadmap::{Roadmap, RoadmapRequest, RoadmapService, UserProfileSummary};
use chrono::Local;
use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Quiz type the scores came from (e.g. interest, aptitude)
    #[arg(long)]
    pub(crate) quiz_type: String,
    /// Category score as NAME=SCORE; repeat for several categories
    #[arg(long = "category", value_parser = parse_category_score)]
    pub(crate) categories: Vec<(String, f64)>,
    /// Already-ranked category label; repeat in rank order
    #[arg(long = "top", conflicts_with = "categories")]
    pub(crate) top: Vec<String>,
    /// Score a stored quiz result from the seed catalog instead
    #[arg(long)]
    pub(crate) result: Option<String>,
    /// Catalog seed file (defaults to ADVISOR_SEED_PATH or the bundled sample)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Persist the recommendation against this user id
    #[arg(long)]
    pub(crate) user: Option<String>,
    /// Print the raw JSON payload
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RoadmapArgs {
    /// Student id whose latest quiz result personalizes the roadmap
    #[arg(long, default_value = "student-demo")]
    pub(crate) user: String,
    /// Catalog seed file (defaults to ADVISOR_SEED_PATH or the bundled sample)
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
    /// Use this quiz result instead of the latest one
    #[arg(long)]
    pub(crate) result: Option<String>,
    /// Class or grade the student is in
    #[arg(long)]
    pub(crate) class_level: Option<String>,
    /// Interest to highlight; repeat for several
    #[arg(long = "interest")]
    pub(crate) interests: Vec<String>,
    /// Goal to highlight; repeat for several
    #[arg(long = "goal")]
    pub(crate) goals: Vec<String>,
    /// Print the raw JSON roadmap
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let (seed, pipeline) = seed_and_pipeline(args.seed)?;
    let catalog = Arc::new(load_catalog(seed.as_deref())?);
    let service = RecommendationService::new(RecommendationStores::shared(catalog), pipeline);

    let request = recommend_request(
        args.quiz_type,
        args.categories,
        args.top,
        args.result,
        args.user,
    );
    let payload = match service.recommend(request, None).await {
        Ok(payload) => payload,
        Err(err) => {
            println!("Recommendation failed: {err}");
            return Ok(());
        }
    };

    if args.json {
        print_json(&payload);
    } else {
        render_recommendations(&payload);
    }
    Ok(())
}

pub(crate) async fn run_roadmap(args: RoadmapArgs) -> Result<(), AppError> {
    let RoadmapArgs {
        user,
        seed,
        result,
        class_level,
        interests,
        goals,
        json,
    } = args;

    let (seed, _) = seed_and_pipeline(seed)?;
    let catalog = Arc::new(load_catalog(seed.as_deref())?);
    let service = RoadmapService::new(catalog);

    let request = RoadmapRequest {
        user_id: Some(user),
        profile: Some(UserProfileSummary {
            class_level,
            interests,
            goals,
        }),
        quiz_result_id: result.map(EntityId::new),
        steps: None,
    };
    let roadmap = match service.generate(request, None).await {
        Ok(roadmap) => roadmap,
        Err(err) => {
            println!("Roadmap generation failed: {err}");
            return Ok(());
        }
    };

    if json {
        print_json(&roadmap);
    } else {
        render_roadmap(&roadmap);
    }
    Ok(())
}

/// Seed path and limits from the environment; an explicit `--seed` wins.
fn seed_and_pipeline(seed: Option<PathBuf>) -> Result<(Option<PathBuf>, PipelineConfig), AppError> {
    let config = AppConfig::load()?;
    Ok((seed.or(config.catalog.seed_path), config.pipeline))
}

fn recommend_request(
    quiz_type: String,
    categories: Vec<(String, f64)>,
    top: Vec<String>,
    result: Option<String>,
    user: Option<String>,
) -> RecommendationRequest {
    let category_scores = (!categories.is_empty()).then(|| {
        let entries: Vec<_> = categories
            .into_iter()
            .map(|(category, score)| json!({ "category": category, "score": score }))
            .collect();
        json!(entries)
    });

    RecommendationRequest {
        quiz_type: Some(quiz_type),
        top_categories: (!top.is_empty()).then(|| json!(top)),
        category_scores,
        quiz_result_id: result.map(EntityId::new),
        user_id: user,
        ..RecommendationRequest::default()
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Payload unavailable: {err}"),
    }
}

fn render_recommendations(payload: &RecommendationPayload) {
    println!(
        "Pathway recommendations ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );

    if payload.top_categories.is_empty() {
        println!("No scored categories; nothing to recommend.");
        return;
    }
    println!("Top categories: {}", payload.top_categories.join(", "));
    if payload.is_empty() {
        println!("No catalog entries are linked to these categories yet.");
    }

    let sections: [(&str, &[RecommendationItem]); 6] = [
        ("Courses", payload.courses.as_slice()),
        ("Careers", payload.careers.as_slice()),
        ("Programs", payload.programs.as_slice()),
        ("Entrance exams", payload.exams.as_slice()),
        ("Interests", payload.interests.as_slice()),
        ("Colleges", payload.colleges.as_slice()),
    ];
    for (label, items) in sections {
        if items.is_empty() {
            println!("\n{label}: none");
            continue;
        }
        println!("\n{label}");
        for item in items {
            println!("- {} [{:.0}% match]", item.title, item.score * 100.0);
            println!("  {}", item.explanation);
        }
    }

    match &payload.recommendation_id {
        Some(id) => println!("\nSaved as recommendation {id}"),
        None => println!("\nNot saved (no user id supplied or storage unavailable)"),
    }
}

fn render_roadmap(roadmap: &Roadmap) {
    println!("Roadmap for {}", roadmap.user_id);
    println!("{}", roadmap.generated_from.rationale);
    if let Some(result_id) = &roadmap.generated_from.quiz_result_id {
        println!("Quiz result: {result_id}");
    }
    println!();
    for (index, step) in roadmap.steps.iter().enumerate() {
        println!("{}. {} ({})", index + 1, step.title, step.category);
        println!("   {}", step.description);
    }
}
