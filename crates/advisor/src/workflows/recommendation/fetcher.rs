use std::sync::Arc;

use tracing::debug;

use super::linking::LinkedIds;
use crate::workflows::catalog::{
    CatalogStore, Career, College, Course, EntityQuery, Exam, IdSet, Interest, LinkField, Program,
    StoreError,
};

/// Raw records pulled from every domain for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedEntities {
    pub courses: Vec<Course>,
    pub careers: Vec<Career>,
    pub programs: Vec<Program>,
    pub exams: Vec<Exam>,
    pub interests: Vec<Interest>,
    pub colleges: Vec<College>,
}

/// Issues the per-domain reads for a set of linked ids.
pub struct EntityFetcher {
    catalog: Arc<dyn CatalogStore>,
    limit: usize,
}

impl EntityFetcher {
    pub fn new(catalog: Arc<dyn CatalogStore>, limit: usize) -> Self {
        Self { catalog, limit }
    }

    pub fn course_query(&self, ids: &LinkedIds) -> EntityQuery {
        EntityQuery::new(self.limit).or_linked(LinkField::Id, ids.courses.clone())
    }

    pub fn career_query(&self, ids: &LinkedIds) -> EntityQuery {
        EntityQuery::new(self.limit).or_linked(LinkField::Id, ids.careers.clone())
    }

    pub fn program_query(&self, ids: &LinkedIds) -> EntityQuery {
        EntityQuery::new(self.limit).or_linked(LinkField::Course, ids.courses.clone())
    }

    /// Exams hang off courses, careers, and interests independently; any path
    /// is enough.
    pub fn exam_query(&self, ids: &LinkedIds) -> EntityQuery {
        EntityQuery::new(self.limit)
            .or_linked(LinkField::Course, ids.courses.clone())
            .or_linked(LinkField::Career, ids.careers.clone())
            .or_linked(LinkField::Interest, ids.interests.clone())
    }

    pub fn interest_query(&self, ids: &LinkedIds) -> EntityQuery {
        EntityQuery::new(self.limit).or_linked(LinkField::Id, ids.interests.clone())
    }

    /// Colleges match through fetched programs (either side of the
    /// relationship), linked courses, or linked streams.
    pub fn college_query(&self, ids: &LinkedIds, programs: &[Program]) -> EntityQuery {
        let program_ids: IdSet = programs.iter().map(|program| program.id.clone()).collect();
        let college_ids: IdSet = programs
            .iter()
            .filter_map(|program| program.college_id.clone())
            .collect();

        EntityQuery::new(self.limit)
            .or_linked(LinkField::Program, program_ids)
            .or_linked(LinkField::Id, college_ids)
            .or_linked(LinkField::Course, ids.courses.clone())
            .or_linked(LinkField::Stream, ids.streams.clone())
    }

    /// Reads run concurrently. Colleges need the program results, so the
    /// programs → colleges chain is a single branch of the join. The first
    /// failing read fails the whole fetch.
    pub async fn fetch(&self, ids: &LinkedIds) -> Result<FetchedEntities, StoreError> {
        if ids.is_empty() {
            debug!("no linked ids; skipping catalog reads");
            return Ok(FetchedEntities::default());
        }

        let course_query = self.course_query(ids);
        let career_query = self.career_query(ids);
        let exam_query = self.exam_query(ids);
        let interest_query = self.interest_query(ids);
        let program_query = self.program_query(ids);

        let programs_and_colleges = async {
            let programs = self.catalog.programs(&program_query).await?;
            let college_query = self.college_query(ids, &programs);
            let colleges = self.catalog.colleges(&college_query).await?;
            Ok::<_, StoreError>((programs, colleges))
        };

        let (courses, careers, exams, interests, (programs, colleges)) = tokio::try_join!(
            self.catalog.courses(&course_query),
            self.catalog.careers(&career_query),
            self.catalog.exams(&exam_query),
            self.catalog.interests(&interest_query),
            programs_and_colleges,
        )?;

        debug!(
            courses = courses.len(),
            careers = careers.len(),
            programs = programs.len(),
            exams = exams.len(),
            interests = interests.len(),
            colleges = colleges.len(),
            "fetched catalog entities"
        );

        Ok(FetchedEntities {
            courses,
            careers,
            programs,
            exams,
            interests,
            colleges,
        })
    }
}
