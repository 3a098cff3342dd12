use infrastructure::meter;

use crate::core::time::{Date, now_in};
use crate::schedule::{AvailabilityService, BusyBlockSource};
use crate::user::UserDirectory;

use super::{
    AskRequest, ModelBackend, QueryError, QueryReply, QueryRequest, calendar_context, date_context,
};

#[derive(Debug, Clone)]
pub struct QueryService<S: BusyBlockSource, M: ModelBackend> {
    users: UserDirectory,
    availability: AvailabilityService<S>,
    model: M,
}

impl<S: BusyBlockSource, M: ModelBackend> QueryService<S, M> {
    pub fn new(users: UserDirectory, availability: AvailabilityService<S>, model: M) -> Self {
        Self {
            users,
            availability,
            model,
        }
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn availability(&self) -> &AvailabilityService<S> {
        &self.availability
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn ask(&self, username: &str, request: QueryRequest) -> Result<QueryReply, QueryError> {
        let user = self.users.find(username).ok_or(QueryError::UserNotFound)?;

        let query = request.query.trim();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let tz = user.timezone();
        let mut history = request.chat_history.unwrap_or_default();
        history.push(date_context(&now_in(tz)));

        if let Some(ctx) = self.availability.scheduling_context(username, Date::today_in(tz), query).await {
            tracing::debug!(
                "Adding calendar context for {} with {} busy days",
                ctx.resolved.range,
                ctx.summary.days().len()
            );
            history.push(calendar_context(&ctx.summary));
        }

        let self_assessment = user
            .self_assessment
            .clone()
            .ok_or(QueryError::MissingSelfAssessment)?;

        //caller identity is not verified here, so memory is never enabled
        let own_model = false;
        let ask = AskRequest {
            query: query.to_owned(),
            self_assessment,
            username: user.username.clone(),
            name: user.name.clone(),
            own_model,
            chat_history: history,
            memory_enabled: request.memory_enabled.unwrap_or(false) && own_model,
        };

        let answer = self.model.ask(&ask).await.map_err(|e| {
            tracing::error!("Error asking model of {}: {:?}", username, e);
            meter::increment("model_request_failed", &[]);
            QueryError::ModelUnavailable(e)
        })?;

        let response = match answer.response {
            Some(response) if !response.trim().is_empty() => response,
            _ => {
                tracing::error!("Invalid response from model of {}", username);
                return Err(QueryError::InvalidModelResponse);
            }
        };

        Ok(QueryReply {
            success: true,
            response,
            memory_confirmation_needed: answer.memory_confirmation_needed,
            memory_data: answer.memory_data,
        })
    }
}

#[cfg(test)]
pub mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use super::*;
    use crate::chat::{AskResponse, ChatMessage, Role};
    use crate::core::time::FIXED_NOW;
    use crate::schedule::{BusyBlock, FakeCalendar, NO_EVENTS_TEXT};
    use crate::user::{SelfAssessment, UserProfile};

    #[derive(Clone, Default)]
    pub struct FakeModel {
        answer: Option<String>,
        fail: bool,
        received: Arc<Mutex<Vec<AskRequest>>>,
    }

    impl FakeModel {
        pub fn answering(answer: &str) -> Self {
            Self {
                answer: Some(answer.to_owned()),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn received(&self) -> Vec<AskRequest> {
            self.received.lock().unwrap().clone()
        }
    }

    impl ModelBackend for FakeModel {
        async fn ask(&self, request: &AskRequest) -> anyhow::Result<AskResponse> {
            self.received.lock().unwrap().push(request.clone());

            if self.fail {
                anyhow::bail!("connection refused");
            }

            Ok(AskResponse {
                response: self.answer.clone(),
                ..Default::default()
            })
        }
    }

    pub fn alice() -> UserProfile {
        UserProfile {
            username: "alice".to_owned(),
            name: "Alice".to_owned(),
            timezone: Some("Europe/Berlin".to_owned()),
            self_assessment: Some(SelfAssessment {
                communication_style: Some("friendly".to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn fixed_now() -> chrono::DateTime<Utc> {
        //Monday, 2024-06-10 15:05 in Berlin
        chrono::DateTime::parse_from_rfc3339("2024-06-10T13:05:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn service(calendar: FakeCalendar, model: FakeModel) -> QueryService<FakeCalendar, FakeModel> {
        let users = UserDirectory::new(vec![
            alice(),
            UserProfile {
                username: "bob".to_owned(),
                name: "Bob".to_owned(),
                ..Default::default()
            },
        ]);

        QueryService::new(users, AvailabilityService::new(calendar), model)
    }

    fn request(query: &str) -> QueryRequest {
        QueryRequest {
            query: query.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_scheduling_query_adds_calendar_context() {
        let calendar = FakeCalendar::default().with_blocks("2024-06-11", vec![BusyBlock::new("15:00", "16:00")]);
        let model = FakeModel::answering("I'm busy at 3pm.");
        let service = service(calendar.clone(), model.clone());

        let reply = FIXED_NOW
            .scope(fixed_now(), service.ask("alice", request("Am I free tomorrow at 3pm?")))
            .await
            .unwrap();

        assert!(reply.success);
        assert_eq!(reply.response, "I'm busy at 3pm.");
        assert_eq!(calendar.requested(), vec!["2024-06-11"]);

        let sent = &model.received()[0];
        assert_eq!(sent.chat_history.len(), 2);
        assert_eq!(
            sent.chat_history[0].content,
            "Current date and time in user's timezone (Europe/Berlin): Monday, June 10, 2024 at 03:05 PM CEST"
        );
        assert_eq!(
            sent.chat_history[1].content,
            "Calendar availability information: \nCalendar information for the requested period:\n\n2024-06-11:\n- Busy from 15:00 to 16:00"
        );
        assert!(!sent.own_model);
        assert!(!sent.memory_enabled);
    }

    #[tokio::test]
    async fn test_today_is_taken_in_user_zone() {
        //late Monday evening in New York is already Tuesday in UTC
        let calendar = FakeCalendar::default();
        let model = FakeModel::answering("ok");
        let mut user = alice();
        user.timezone = Some("America/New_York".to_owned());
        let service = QueryService::new(
            UserDirectory::new(vec![user]),
            AvailabilityService::new(calendar.clone()),
            model,
        );
        let late_monday = chrono::DateTime::parse_from_rfc3339("2024-06-11T02:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        FIXED_NOW
            .scope(late_monday, service.ask("alice", request("tomorrow?")))
            .await
            .unwrap();

        assert_eq!(calendar.requested(), vec!["2024-06-11"]);
    }

    #[tokio::test]
    async fn test_history_is_kept_and_extended() {
        let model = FakeModel::answering("Hi!");
        let service = service(FakeCalendar::default(), model.clone());
        let request = QueryRequest {
            query: "hello".to_owned(),
            chat_history: Some(vec![ChatMessage {
                role: Role::User,
                content: "earlier".to_owned(),
            }]),
            memory_enabled: Some(true),
        };

        FIXED_NOW
            .scope(fixed_now(), service.ask("alice", request))
            .await
            .unwrap();

        let sent = &model.received()[0];
        assert_eq!(sent.chat_history.len(), 2);
        assert_eq!(sent.chat_history[0].content, "earlier");
        assert_eq!(sent.chat_history[1].role, Role::System);
        assert!(!sent.memory_enabled);
    }

    #[tokio::test]
    async fn test_no_events_summary() {
        let model = FakeModel::answering("You're free.");
        let service = service(FakeCalendar::default(), model.clone());

        FIXED_NOW
            .scope(fixed_now(), service.ask("alice", request("anything this week?")))
            .await
            .unwrap();

        let sent = &model.received()[0];
        assert_eq!(
            sent.chat_history[1].content,
            format!("Calendar availability information: \n{}", NO_EVENTS_TEXT)
        );
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected() {
        let model = FakeModel::answering("unused");
        let service = service(FakeCalendar::default(), model.clone());

        let result = service.ask("alice", request("   ")).await;

        assert!(matches!(result, Err(QueryError::EmptyQuery)));
        assert!(model.received().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_reported_before_empty_query() {
        let service = service(FakeCalendar::default(), FakeModel::answering("unused"));

        let result = service.ask("mallory", request("")).await;

        assert!(matches!(result, Err(QueryError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let service = service(FakeCalendar::default(), FakeModel::answering("unused"));

        let result = service.ask("mallory", request("hi")).await;

        assert!(matches!(result, Err(QueryError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_missing_self_assessment() {
        let service = service(FakeCalendar::default(), FakeModel::answering("unused"));

        let result = service.ask("bob", request("hi")).await;

        assert!(matches!(result, Err(QueryError::MissingSelfAssessment)));
    }

    #[tokio::test]
    async fn test_model_failure() {
        let service = service(FakeCalendar::default(), FakeModel::failing());

        let result = service.ask("alice", request("hi")).await;

        assert!(matches!(result, Err(QueryError::ModelUnavailable(_))));
    }

    #[tokio::test]
    async fn test_empty_model_answer_is_invalid() {
        let service = service(FakeCalendar::default(), FakeModel::default());

        let result = service.ask("alice", request("hi")).await;

        assert!(matches!(result, Err(QueryError::InvalidModelResponse)));
    }
}
