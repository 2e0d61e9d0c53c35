//! Static knowledge base of the help-desk chatbot.

/// A suggested follow-up the user can pick instead of typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    /// Classification input used when the action is picked
    pub id: &'static str,
    /// Text shown to the user (and echoed into the transcript)
    pub label: &'static str,
    /// Emoji shown before the label
    pub icon: &'static str,
}

/// Canned reply of one topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatResponse {
    /// Message body
    pub message: &'static str,
    /// Follow-ups offered with the message
    pub quick_actions: &'static [QuickAction],
}

const fn action(id: &'static str, label: &'static str, icon: &'static str) -> QuickAction {
    QuickAction { id, label, icon }
}

/// Knowledge-base topics, in classification order. Ties go to the earlier topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Welcome and main menu
    Greetings,
    /// Payment channels
    Payments,
    /// Business permit applications
    Permits,
    /// Fee structure
    Fees,
    /// Phone, email and social media
    Contact,
    /// Physical office
    Office,
    /// Working hours
    Hours,
    /// Revenue services overview
    Services,
    /// Permit renewal
    Renewal,
    /// Payment receipts
    Receipt,
}

impl Topic {
    /// Every topic, in classification order
    pub const ALL: [Self; 10] = [
        Self::Greetings,
        Self::Payments,
        Self::Permits,
        Self::Fees,
        Self::Contact,
        Self::Office,
        Self::Hours,
        Self::Services,
        Self::Renewal,
        Self::Receipt,
    ];

    /// Topic id, also used as a quick-action id
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Greetings => "greetings",
            Self::Payments => "payments",
            Self::Permits => "permits",
            Self::Fees => "fees",
            Self::Contact => "contact",
            Self::Office => "office",
            Self::Hours => "hours",
            Self::Services => "services",
            Self::Renewal => "renewal",
            Self::Receipt => "receipt",
        }
    }

    /// Looks a topic up by id
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.id() == id)
    }

    /// Keywords scored against user input
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Greetings => &[
                "hello",
                "hi",
                "hey",
                "good morning",
                "good afternoon",
                "good evening",
                "greetings",
                "start",
            ],
            Self::Payments => &[
                "pay",
                "payment",
                "mpesa",
                "bank",
                "how to pay",
                "paybill",
                "transfer",
                "money",
            ],
            Self::Permits => &[
                "permit",
                "license",
                "business permit",
                "registration",
                "apply",
                "application",
                "sbp",
            ],
            Self::Fees => &["fees", "cost", "charges", "how much", "price", "rates"],
            Self::Contact => &["contact", "phone", "email", "reach", "call", "write", "address"],
            Self::Office => &["office", "location", "where", "address", "visit", "physical"],
            Self::Hours => &[
                "hours",
                "time",
                "open",
                "close",
                "working hours",
                "operation",
                "when",
            ],
            Self::Services => &["services", "what do you do", "revenue", "streams", "collect"],
            Self::Renewal => &["renew", "renewal", "extend", "expire", "expired"],
            Self::Receipt => &["receipt", "proof", "confirmation", "payment receipt"],
        }
    }

    /// Canned reply for this topic
    #[must_use]
    pub fn response(self) -> &'static ChatResponse {
        match self {
            Self::Greetings => &GREETINGS,
            Self::Payments => &PAYMENTS,
            Self::Permits => &PERMITS,
            Self::Fees => &FEES,
            Self::Contact => &CONTACT,
            Self::Office => &OFFICE,
            Self::Hours => &HOURS,
            Self::Services => &SERVICES,
            Self::Renewal => &RENEWAL,
            Self::Receipt => &RECEIPT,
        }
    }
}

static GREETINGS: ChatResponse = ChatResponse {
    message: "Welcome to Embu County Revenue Authority! I'm here to assist you with information about our services.",
    quick_actions: &[
        action("payments", "Payment Options", "💳"),
        action("permits", "Business Permits", "📋"),
        action("contact", "Contact Us", "📞"),
        action("services", "Our Services", "🏛️"),
    ],
};

static PAYMENTS: ChatResponse = ChatResponse {
    message: concat!(
        "We offer multiple convenient payment methods:\n\n",
        "💳 M-Pesa Paybill:\n",
        "   • Paybill No: 800600\n",
        "   • Account: Your ID Number\n\n",
        "🏦 Bank Transfer:\n",
        "   • Bank: Kenya Commercial Bank\n",
        "   • Account: 1234567890\n",
        "   • Branch: Embu\n\n",
        "🏢 Cash Payment:\n",
        "   • Visit our offices during working hours",
    ),
    quick_actions: &[
        action("receipt", "Payment Receipt", "🧾"),
        action("office", "Office Location", "📍"),
        action("hours", "Working Hours", "🕒"),
    ],
};

static PERMITS: ChatResponse = ChatResponse {
    message: concat!(
        "Business Permit Application Process:\n\n",
        "1️⃣ Required Documents:\n",
        "   • ID/Passport copy\n",
        "   • KRA PIN Certificate\n",
        "   • Business Registration Certificate\n",
        "   • Lease Agreement/Ownership Documents\n\n",
        "2️⃣ Application Steps:\n",
        "   • Fill application form\n",
        "   • Submit documents\n",
        "   • Pay applicable fees\n",
        "   • Await inspection (if required)\n\n",
        "3️⃣ Processing Time: 5-7 working days",
    ),
    quick_actions: &[
        action("fees", "Permit Fees", "💰"),
        action("renewal", "Permit Renewal", "🔄"),
        action("status", "Check Status", "📊"),
    ],
};

static FEES: ChatResponse = ChatResponse {
    message: concat!(
        "Business Permit Fee Structure:\n\n",
        "📊 Based on business category:\n",
        "   • Small Scale: Ksh 2,500 - 5,000\n",
        "   • Medium Scale: Ksh 5,000 - 15,000\n",
        "   • Large Scale: Ksh 15,000 - 50,000\n\n",
        "💡 Additional Charges:\n",
        "   • Fire Certificate: Ksh 1,000\n",
        "   • Health Certificate: Ksh 2,000\n",
        "   • Signboard Fee: Ksh 500 - 2,000\n\n",
        "Note: Fees vary by business type and location",
    ),
    quick_actions: &[
        action("payments", "Pay Now", "💳"),
        action("permits", "Apply for Permit", "📋"),
    ],
};

static CONTACT: ChatResponse = ChatResponse {
    message: concat!(
        "Contact Embu County Revenue Authority:\n\n",
        "📞 Phone Numbers:\n",
        "   • Main Line: +254 768 800 600\n",
        "   • Hotline: 0800 600 600 (Toll Free)\n\n",
        "📧 Email:\n",
        "   • General: info@emburevenue.go.ke\n",
        "   • Support: support@emburevenue.go.ke\n\n",
        "🌐 Website: www.emburevenue.go.ke\n\n",
        "📱 Social Media: @EmbuRevenue",
    ),
    quick_actions: &[
        action("office", "Visit Office", "📍"),
        action("hours", "Working Hours", "🕒"),
        action("directions", "Get Directions", "🗺️"),
    ],
};

static OFFICE: ChatResponse = ChatResponse {
    message: concat!(
        "📍 Our Office Location:\n\n",
        "Embu County Revenue Authority\n",
        "County Headquarters Building, 3rd Floor\n",
        "Embu Town, Embu County\n\n",
        "🚗 Landmarks:\n",
        "   • Opposite Embu Law Courts\n",
        "   • Next to County Assembly\n",
        "   • 200m from Embu Bus Station\n\n",
        "🅿️ Free parking available",
    ),
    quick_actions: &[
        action("hours", "Working Hours", "🕒"),
        action("contact", "Contact Details", "📞"),
        action("directions", "Get Directions", "🗺️"),
    ],
};

static HOURS: ChatResponse = ChatResponse {
    message: concat!(
        "🕒 Working Hours:\n\n",
        "📅 Monday - Friday:\n",
        "   • 8:00 AM - 5:00 PM\n",
        "   • Lunch Break: 1:00 PM - 2:00 PM\n\n",
        "📅 Saturday:\n",
        "   • 9:00 AM - 1:00 PM\n",
        "   • (First & Third Saturday only)\n\n",
        "📅 Sunday & Public Holidays:\n",
        "   • Closed\n\n",
        "💡 Online services available 24/7",
    ),
    quick_actions: &[
        action("contact", "Contact Us", "📞"),
        action("office", "Office Location", "📍"),
    ],
};

static SERVICES: ChatResponse = ChatResponse {
    message: concat!(
        "🏛️ Our Revenue Services:\n\n",
        "1. Business Permits & Licenses\n",
        "2. Land Rates & Property Tax\n",
        "3. Parking Fees & Permits\n",
        "4. Market & Trade Licenses\n",
        "5. Building Plan Approvals\n",
        "6. Outdoor Advertising Fees\n",
        "7. Health & Fire Certificates\n",
        "8. Cess & Agricultural Levies",
    ),
    quick_actions: &[
        action("permits", "Business Permits", "📋"),
        action("payments", "Make Payment", "💳"),
        action("fees", "View Fees", "💰"),
    ],
};

static RENEWAL: ChatResponse = ChatResponse {
    message: concat!(
        "🔄 Permit Renewal Process:\n\n",
        "✅ Requirements:\n",
        "   • Expired/expiring permit\n",
        "   • Valid compliance certificates\n",
        "   • Updated business documents\n\n",
        "📝 Steps:\n",
        "   1. Submit renewal application\n",
        "   2. Update any changed information\n",
        "   3. Pay renewal fees\n",
        "   4. Collect renewed permit\n\n",
        "⏰ Renew 30 days before expiry to avoid penalties",
    ),
    quick_actions: &[
        action("fees", "Renewal Fees", "💰"),
        action("payments", "Pay Now", "💳"),
    ],
};

static RECEIPT: ChatResponse = ChatResponse {
    message: concat!(
        "🧾 Payment Receipt Information:\n\n",
        "After payment, you will receive:\n",
        "   • SMS confirmation immediately\n",
        "   • Official receipt via email\n",
        "   • Receipt number for tracking\n\n",
        "📥 To get a duplicate receipt:\n",
        "   • Visit our office with payment reference\n",
        "   • Email: receipts@emburevenue.go.ke\n",
        "   • Call: 0800 600 600\n\n",
        "Keep your receipt for record purposes",
    ),
    quick_actions: &[
        action("contact", "Contact Support", "📞"),
        action("office", "Visit Office", "📍"),
    ],
};

/// Reply used when no topic scores above the threshold
pub static FALLBACK: ChatResponse = ChatResponse {
    message: concat!(
        "I apologize, but I don't have specific information about that query. ",
        "However, I can help you with:\n\n",
        "• Payment methods and procedures\n",
        "• Business permit applications\n",
        "• Fee structures and rates\n",
        "• Contact information and office hours\n\n",
        "You can also reach our support team directly for personalized assistance.",
    ),
    quick_actions: &[
        action("contact", "Contact Support", "📞"),
        action("services", "View Services", "🏛️"),
        action("greetings", "Main Menu", "🏠"),
    ],
};
