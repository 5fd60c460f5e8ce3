use async_trait::async_trait;
use store_actor::{Record, StoreActor, StoreClient, StoreError};

// --- Records ---

#[derive(Clone, Debug, PartialEq)]
struct Crew {
    id: u32,
    name: String,
    on_call: bool,
}

#[derive(Debug)]
struct CrewCreate {
    name: String,
}

#[derive(Debug)]
struct CrewUpdate {
    name: Option<String>,
}

#[derive(Debug)]
enum CrewAction {
    ToggleOnCall,
}

#[derive(Debug, thiserror::Error)]
#[error("crew error")]
struct CrewError;

#[async_trait]
impl Record for Crew {
    type Id = u32;
    type Create = CrewCreate;
    type Update = CrewUpdate;
    type Action = CrewAction;
    type ActionResult = bool;
    type Context = ();
    type Error = CrewError;

    fn from_create_params(id: u32, params: CrewCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            on_call: false,
        })
    }

    async fn on_update(&mut self, update: CrewUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: CrewAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            CrewAction::ToggleOnCall => {
                self.on_call = !self.on_call;
                Ok(self.on_call)
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Visit {
    id: u32,
    crew_id: u32,
}

#[derive(Debug)]
struct VisitCreate {
    crew_id: u32,
}

#[derive(Debug, thiserror::Error)]
enum VisitError {
    #[error("unknown crew {0}")]
    UnknownCrew(u32),
    #[error("crew store unavailable: {0}")]
    Store(#[from] StoreError),
}

#[async_trait]
impl Record for Visit {
    type Id = u32;
    type Create = VisitCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = StoreClient<Crew>;
    type Error = VisitError;

    fn from_create_params(id: u32, params: VisitCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            crew_id: params.crew_id,
        })
    }

    async fn on_create(&mut self, crews: &StoreClient<Crew>) -> Result<(), Self::Error> {
        match crews.get(self.crew_id).await? {
            Some(_) => Ok(()),
            None => Err(VisitError::UnknownCrew(self.crew_id)),
        }
    }

    async fn on_update(&mut self, _update: (), _ctx: &StoreClient<Crew>) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &StoreClient<Crew>) -> Result<(), Self::Error> {
        Ok(())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let (actor, client) = StoreActor::<Crew>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client
        .create(CrewCreate {
            name: "North".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    assert!(client.perform_action(id, CrewAction::ToggleOnCall).await.unwrap());
    let crew: Crew = client.get(id).await.unwrap().unwrap();
    assert!(crew.on_call);

    let renamed = client
        .update(
            id,
            CrewUpdate {
                name: Some("North East".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "North East");

    let removed = client.delete(id).await.unwrap();
    assert_eq!(removed.name, "North East");
    assert!(client.get(id).await.unwrap().is_none());
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let (actor, client) = StoreActor::<Crew>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .update(42, CrewUpdate { name: None })
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "42"));

    let err = client
        .perform_action(42, CrewAction::ToggleOnCall)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[tokio::test]
async fn test_context_hook_rejects_dangling_reference() {
    let (crew_actor, crew_client) = StoreActor::<Crew>::new(10);
    let (visit_actor, visit_client) = StoreActor::<Visit>::new(10);
    tokio::spawn(crew_actor.run(()));
    tokio::spawn(visit_actor.run(crew_client.clone()));

    let crew_id = crew_client
        .create(CrewCreate {
            name: "South".into(),
        })
        .await
        .unwrap();

    let visit_id = visit_client.create(VisitCreate { crew_id }).await.unwrap();
    let visit = visit_client.get(visit_id).await.unwrap().unwrap();
    assert_eq!(visit.crew_id, crew_id);

    let err = visit_client
        .create(VisitCreate { crew_id: 99 })
        .await
        .unwrap_err();
    assert!(matches!(
        err.entity_error::<VisitError>(),
        Some(VisitError::UnknownCrew(99))
    ));
    assert_eq!(visit_client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_closed_store_reports_actor_closed() {
    let (actor, client) = StoreActor::<Crew>::new(1);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, StoreError::ActorClosed));
}
