// Section catalog - narrative and chart layout for each dashboard page
use crate::domain::chart::{
    AxisTrace, BarColoring, ChartFrame, ChartSpec, Color, Dash, LineTrace, MarkerSymbol,
    ReferenceLine, TraceSpec,
};
use crate::domain::error::Result;
use crate::domain::page::{BlockSpec, Metric, TextBlock, Tone};

pub const DASHBOARD_TITLE: &str = "U.S. Economic Analysis Dashboard";
pub const DASHBOARD_SUBTITLE: &str = "Year-End 2025 | Data, Tensions, and Contested Narratives";

pub const DATA_SOURCES: [&str; 8] = [
    "Bureau of Economic Analysis",
    "Rosenberg Research",
    "Federal Reserve Banks",
    "Bureau of Labor Statistics",
    "University of Michigan",
    "Conference Board",
    "National Association of Realtors",
    "Cox Automotive / KBB",
];

pub const FOOTER: &str = "U.S. Economic Analysis Dashboard | December 2025";
pub const FOOTER_SOURCES: &str = "Sources: BEA, Rosenberg Research, Federal Reserve Banks, BLS, \
University of Michigan, Conference Board, NAR, Cox Automotive/KBB, Brookings, Yale Budget Lab";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    GdpControversy,
    ConsumerSentiment,
    LaborMarket,
    Housing,
    Vehicles,
    KShape,
    InvestmentGuidance,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Overview,
        Section::GdpControversy,
        Section::ConsumerSentiment,
        Section::LaborMarket,
        Section::Housing,
        Section::Vehicles,
        Section::KShape,
        Section::InvestmentGuidance,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Overview => "overview",
            Section::GdpControversy => "gdp-controversy",
            Section::ConsumerSentiment => "consumer-sentiment",
            Section::LaborMarket => "labor-market",
            Section::Housing => "housing",
            Section::Vehicles => "vehicles",
            Section::KShape => "k-shape",
            Section::InvestmentGuidance => "investment-guidance",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            Section::Overview => "Overview",
            Section::GdpControversy => "GDP Controversy",
            Section::ConsumerSentiment => "Consumer Sentiment",
            Section::LaborMarket => "Labor Market",
            Section::Housing => "Housing",
            Section::Vehicles => "Vehicles",
            Section::KShape => "K-Shape Analysis",
            Section::InvestmentGuidance => "Investment Guidance",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Section::Overview => "Executive Summary",
            Section::GdpControversy => "The Q2 & Q3 2025 GDP Controversy",
            Section::ConsumerSentiment => "Consumer Sentiment Indices",
            Section::LaborMarket => "Labor Market: The Hidden Stratification",
            Section::Housing => "Housing Affordability Crisis",
            Section::Vehicles => "Vehicle Market: Affordability Collapse",
            Section::KShape => "The K-Shaped Economy Explained",
            Section::InvestmentGuidance => "What Should a Prudent Investor Do in 2026?",
        }
    }

    pub fn blocks(&self) -> Result<Vec<BlockSpec>> {
        match self {
            Section::Overview => overview(),
            Section::GdpControversy => gdp_controversy(),
            Section::ConsumerSentiment => consumer_sentiment(),
            Section::LaborMarket => labor_market(),
            Section::Housing => housing(),
            Section::Vehicles => vehicles(),
            Section::KShape => Ok(k_shape()),
            Section::InvestmentGuidance => Ok(investment_guidance()),
        }
    }
}

fn text(block: TextBlock) -> BlockSpec {
    BlockSpec::text(block)
}

fn zero_line() -> ReferenceLine {
    ReferenceLine::at(0.0)
}

fn overview() -> Result<Vec<BlockSpec>> {
    let gdp_bars = ChartSpec::bar(
        ChartFrame::new("Quarterly GDP Growth (Annualized %)").reference_line(zero_line()),
        TraceSpec::new("Official_BEA", "GDP", Color::BLUE),
        BarColoring::Gradient(vec![Color::RED, Color::AMBER, Color::GREEN]),
    )?;

    Ok(vec![
        text(TextBlock::metrics(vec![
            Metric::new("Q2-Q3 2025 GDP (Official)", "3.8-4.3%", "BEA Releases"),
            Metric::new("Q2-Q3 2025 GDP (Disputed)", "0.8-1.5%?", "Rosenberg Methodology")
                .inverse(),
            Metric::new("Michigan Sentiment", "52.9", "2nd lowest ever").inverse(),
            Metric::new("Unemployment", "4.6%", "Nov 2025"),
        ])),
        text(TextBlock::metrics(vec![
            Metric::new("Expectations Index", "70.7", "11 mo. below 80").inverse(),
            Metric::new("Median Home Price", "$417K", "5.0x income"),
            Metric::new("New Vehicle ATP", "$49,814", "8 models <$25K"),
            Metric::new("Recent Grad Unemployment", "9.7%", "= HS diploma rate").inverse(),
        ])),
        text(TextBlock::Divider),
        text(TextBlock::callout(
            Tone::Warning,
            "**THE CENTRAL PARADOX**

            Official GDP shows 3.8-4.3% growth in Q2-Q3 2025 while consumer sentiment sits at the \
            second-lowest level ever recorded. Either consumers are irrational, or the GDP figures \
            don't reflect their economic reality.",
        )),
        BlockSpec::chart("gdp", gdp_bars),
    ])
}

fn gdp_controversy() -> Result<Vec<BlockSpec>> {
    let official_vs_disputed = ChartSpec::combo(
        ChartFrame::new("Quarterly GDP Growth (Annualized %)")
            .height(450)
            .reference_line(zero_line().width(2.0))
            .horizontal_legend(),
        TraceSpec::new("Official_BEA", "Official GDP %", Color::BLUE),
        LineTrace::new(TraceSpec::new("Rosenberg_Adjusted", "Disputed GDP %", Color::RED))
            .dash(Dash::Dot)
            .markers(MarkerSymbol::Diamond, 15),
    )?;

    let disputed_quarters = ChartSpec::line(
        ChartFrame::new("Q2-Q3 2025: Official vs Adjusted (Annualized %)")
            .height(350)
            .y_range(0.0, 5.0),
        vec![
            LineTrace::new(
                TraceSpec::new("Official_BEA", "Official (BEA)", Color::BLUE)
                    .between("Q2 25", "Q3 25"),
            )
            .width(3.0)
            .markers(MarkerSymbol::Circle, 10),
            LineTrace::new(
                TraceSpec::new("Rosenberg_Adjusted", "Adjusted (Rosenberg)", Color::RED)
                    .between("Q2 25", "Q3 25"),
            )
            .width(3.0)
            .dash(Dash::Dot)
            .markers(MarkerSymbol::Diamond, 12),
        ],
    )?;

    Ok(vec![
        BlockSpec::chart("gdp", official_vs_disputed),
        text(TextBlock::heading(3, "Both Q2 and Q3 2025 Are Disputed")),
        text(TextBlock::callout(
            Tone::Info,
            "**Q2 2025 - Official: 3.8%**

            BEA stated growth was \"primarily reflected by a decrease in imports.\"

            Key factors:
            - Imports plunged **-29.3%** (massive mechanical boost)
            - Consumer spending: +2.5% (modest)
            - Government spending: -0.1% (contracted)

            **Estimated organic growth: ~0.5-1.5%**",
        )),
        text(TextBlock::callout(
            Tone::Info,
            "**Q3 2025 - Official: 4.3%**

            Rosenberg called this \"fugazi\" (fake).

            Key factors:
            - Imports: -4.7% (continued boost)
            - Government spending: +2.2% (surge)
            - Consumer spending funded by savings drawdown

            **Rosenberg's calculation: ~0.8%**",
        )),
        BlockSpec::chart("gdp", disputed_quarters),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "Comparison of Distortion Factors")),
        text(TextBlock::table(
            &["Factor", "Q2 2025", "Q3 2025"],
            &[
                &["Import Change", "-29.3%", "-4.7%"],
                &["Government Spending", "-0.1%", "+2.2%"],
                &["Consumer Spending", "+2.5%", "+3.5%"],
                &["Primary Distortion", "Massive import collapse", "Gov spending + imports"],
                &["Official GDP", "3.8%", "4.3%"],
                &["Estimated Organic GDP", "~0.5-1.5%", "~0.8%"],
            ],
        )),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "The True 2025 Trajectory?")),
        text(TextBlock::table(
            &["Quarter", "Official GDP", "Disputed GDP", "Interpretation"],
            &[
                &["Q1 2025", "-0.5%", "-0.5%", "Contraction (undisputed)"],
                &["Q2 2025", "3.8%", "~0.5-1.5%", "Weak, not strong"],
                &["Q3 2025", "4.3%", "~0.8%", "Weak, not surging"],
            ],
        )),
        text(TextBlock::callout(
            Tone::Success,
            "**Official Narrative:**
            Economy contracted in Q1, then roared back with 3.8% and 4.3% growth. Resilient \
            consumer, strong recovery.",
        )),
        text(TextBlock::callout(
            Tone::Error,
            "**Disputed Narrative:**
            Economy contracted in Q1, limped along at ~1% in Q2-Q3, masked by import collapse and \
            government spending. Persistently weak.",
        )),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "If Disputed Figures Are Correct:")),
        text(TextBlock::paragraph(
            "**The 'Paradox' Disappears:** Consumers are accurately perceiving a weak economy that headline numbers mask.
            **Expectations Index Validated:** The 11-month recession signal is working, detecting weakness official stats miss.
            **Full-Year 2025 Is Weak:** Three consecutive quarters of contraction or near-zero growth. Not a 'soft landing.'
            **Fed Policy Looks Different:** Rate cuts look late and possibly insufficient, not unnecessary.
            **Political Narrative Inverts:** Tariff 'success' story flips to 'economy weak despite trade policy.'",
        )),
    ])
}

fn consumer_sentiment() -> Result<Vec<BlockSpec>> {
    let indices = ChartSpec::dual_axis(
        ChartFrame::new("Consumer Sentiment: Michigan vs Conference Board"),
        AxisTrace::line(TraceSpec::new("Michigan", "Michigan Index", Color::RED), 2.0)
            .titled("Michigan Index")
            .range(40.0, 110.0),
        AxisTrace::line(TraceSpec::new("Conference_Board", "Conference Board", Color::BLUE), 2.0)
            .titled("Conference Board")
            .range(70.0, 140.0),
    )?;

    let expectations = ChartSpec::bar(
        ChartFrame::new("Expectations Index (Monthly)").reference_line(
            ReferenceLine::at(80.0)
                .color(Color::RED)
                .width(2.0)
                .annotated("Recession Threshold (80)"),
        ),
        TraceSpec::new("Expectations_Index", "Expectations Index", Color::BLUE),
        BarColoring::Threshold {
            value: 80.0,
            below: Color::RED,
            above: Color::GREEN,
        },
    )?;

    Ok(vec![
        BlockSpec::chart("sentiment", indices),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "Expectations Index: Recession Signal Tracker")),
        text(TextBlock::paragraph("*Below 80 = historically signals recession ahead*")),
        BlockSpec::chart("expectations", expectations),
        text(TextBlock::callout(
            Tone::Error,
            "**The Expectations Index has been below 80 for 11 consecutive months**, the longest \
            sustained recession signal in decades. Yet no recession has occurred by traditional measures.",
        )),
    ])
}

fn labor_market() -> Result<Vec<BlockSpec>> {
    let unemployment = ChartSpec::line(
        ChartFrame::new("Unemployment: Overall vs. Young Graduates")
            .x_title("Year")
            .y_title("Unemployment Rate (%)")
            .y_range(0.0, 12.0),
        vec![
            LineTrace::new(TraceSpec::new("Overall", "Overall Rate", Color::BLUE)).width(3.0),
            LineTrace::new(TraceSpec::new(
                "Young_Grads_22_27",
                "College Grads 22-27",
                Color::GREEN,
            )),
            LineTrace::new(TraceSpec::new("Recent_Grads", "Recent Graduates", Color::RED))
                .width(3.0),
        ],
    )?;

    Ok(vec![
        BlockSpec::chart("unemployment", unemployment),
        text(TextBlock::metrics(vec![
            Metric::new("Overall Unemployment", "4.6%", "Highest since Oct 2021"),
            Metric::new("Recent Grad Unemployment", "9.7%", "= High school diploma rate").inverse(),
            Metric::new("Recent Grad Underemployment", "41.8%", "Up from ~35% in 2019").inverse(),
        ])),
        text(TextBlock::callout(
            Tone::Warning,
            "**THE K-SHAPE IN LABOR**

            Overall unemployment at 4.6% masks a generational crisis:
            - Entry-level hiring: **-23%** vs. March 2020
            - Only **30%** of recent grads have full-time jobs in their field
            - Monthly job creation since March: **35K** (vs. ~180K typical)",
        )),
    ])
}

fn housing() -> Result<Vec<BlockSpec>> {
    let affordability = ChartSpec::dual_axis(
        ChartFrame::new("Housing: Price and Affordability"),
        AxisTrace::bars(TraceSpec::new("Median_Price_K", "Median Price ($K)", Color::BLUE))
            .titled("Median Price ($K)"),
        AxisTrace::line(TraceSpec::new("Cost_Pct_Income", "Cost as % of Income", Color::RED), 3.0)
            .titled("Cost as % of Income"),
    )?;

    Ok(vec![
        BlockSpec::chart("housing", affordability),
        text(TextBlock::metrics(vec![
            Metric::new("Median Home Price", "$417K", "Down from $449K peak"),
            Metric::new("Price-to-Income", "5.0x", "Historic norm: 3-4x").inverse(),
            Metric::new("First-Time Buyer Age", "40", "Up from 33 in 2019").inverse(),
            Metric::new("$75K HH Can Afford", "21%", "Down from 49% in 2019").inverse(),
        ])),
        text(TextBlock::Divider),
        text(TextBlock::paragraph(
            "**The Housing K-Shape:**
            - Median buyer age: **59** (record high)
            - Institutional investors: **30%** of purchases (H1 2025)
            - First-time buyers: pushed out

            The market hasn't collapsed because high-income and institutional buyers keep it \
            elevated, but accessibility has collapsed.",
        )),
    ])
}

fn vehicles() -> Result<Vec<BlockSpec>> {
    let prices = ChartSpec::dual_axis(
        ChartFrame::new("Vehicle Prices and Affordability"),
        AxisTrace::bars(TraceSpec::new(
            "Avg_Transaction_Price",
            "Avg Transaction Price ($)",
            Color::BLUE,
        ))
        .titled("Avg Transaction Price ($)"),
        AxisTrace::line(TraceSpec::new("Models_Under_25K", "Models Under $25K", Color::RED), 3.0)
            .titled("Models Under $25K"),
    )?;

    Ok(vec![
        BlockSpec::chart("vehicles", prices),
        text(TextBlock::metrics(vec![
            Metric::new("Avg Transaction Price", "$49,814", "Sept hit $50,080"),
            Metric::new("Models Under $25K", "8", "Down from 30 in 2019").inverse(),
            Metric::new("Avg Monthly Payment", "$754", "Up from $554 in 2019"),
            Metric::new("Buyers w/ $1K+ Payment", "~20%", "Up from ~5% in 2019").inverse(),
        ])),
        text(TextBlock::callout(
            Tone::Warning,
            "**THE K-SHAPE IN VEHICLES**

            More vehicles now sell **above $75K** than **below $25K**.

            The market is functioning for those who can afford it. Price-sensitive buyers have \
            been structurally excluded, not temporarily priced out.",
        )),
    ])
}

fn k_shape() -> Vec<BlockSpec> {
    vec![
        text(TextBlock::callout(
            Tone::Success,
            "**↗ Upper arm:** Asset owners, high income, luxury markets. Recovering and growing.",
        )),
        text(TextBlock::callout(
            Tone::Error,
            "**↘ Lower arm:** Non-asset owners, middle income. Stagnating or declining.",
        )),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "K-Shape Manifestations Across Markets")),
        text(TextBlock::table(
            &["Category", "Upper Arm (Rising)", "Lower Arm (Declining)"],
            &[
                &["Housing Buyers", "Median age 59, cash buyers up", "First-time buyer age → 40"],
                &["Vehicle Market", "More sales >$75K than <$25K", "Only 8 models under $25K"],
                &["Labor Market", "Overall unemployment 4.6%", "Recent grad unemployment 9.7%"],
                &[
                    "Consumer Sentiment",
                    "Asset owners see strong economy",
                    "Non-asset owners see weakness",
                ],
            ],
        )),
        text(TextBlock::callout(
            Tone::Info,
            "**Investment Implication**

            The K-shape is not temporary. It's structural. Prudent investors should:
            - **Overweight:** Companies serving the upper arm (luxury, wealth management, premium services)
            - **Underweight:** Companies dependent on broad middle-class spending, credit access, or entry-level employment",
        )),
    ]
}

fn investment_guidance() -> Vec<BlockSpec> {
    vec![
        text(TextBlock::paragraph(
            "Given the tensions identified (contested GDP figures for **both Q2 and Q3 2025**, \
            record-low consumer sentiment, 11 months of recession signals, and K-shaped market \
            dynamics) the following framework may guide prudent investment decisions.",
        )),
        text(TextBlock::Divider),
        text(TextBlock::expander(
            "1. Acknowledge Elevated Uncertainty",
            "The data does not support high-conviction directional bets. If official GDP is \
            accurate, the economy has been strong since Q2. If the critics are correct, the \
            economy has been weak for most of 2025 and recession risk is elevated.

            **Implication:** Reduce concentration. Diversify across asset classes, geographies, \
            and factor exposures. Avoid maximum-risk positions.",
            true,
        )),
        text(TextBlock::expander(
            "2. Respect the Consumer Sentiment Signal",
            "Consumer sentiment at the second-lowest level on record will affect corporate \
            earnings in consumer-facing sectors, even if GDP is strong.

            **Implication:** Underweight consumer discretionary, particularly companies dependent \
            on middle-income households. Overweight consumer staples and companies serving \
            high-income demographics.",
            false,
        )),
        text(TextBlock::expander(
            "3. Prepare for Policy Volatility",
            "Tariff policy remains uncertain. The Fed may pause, cut, or reverse course. \
            Political dynamics may shift fiscal policy.

            **Implication:** Maintain higher-than-normal cash reserves. Consider options \
            strategies for downside protection. Favor companies with pricing power and domestic \
            supply chains.",
            false,
        )),
        text(TextBlock::expander(
            "4. Position for K-Shaped Reality",
            "High-income households continue spending; lower and middle-income households are \
            stretched. This is structural, not temporary.

            **Implication:** Favor luxury goods, premium services, wealth management. Be cautious \
            with companies dependent on broad middle-class spending or entry-level employment.",
            false,
        )),
        text(TextBlock::expander(
            "5. Watch Leading Indicators, Not Headlines",
            "The GDP controversy shows headline numbers can mislead. The Expectations Index, \
            initial jobless claims, and credit card delinquency may provide earlier signals.

            **Implication:** Build a dashboard of leading indicators. React to their trends \
            rather than waiting for official GDP prints.",
            false,
        )),
        text(TextBlock::Divider),
        text(TextBlock::heading(3, "Portfolio Positioning Framework")),
        text(TextBlock::table(
            &["Category", "Overweight", "Underweight"],
            &[
                &["Equities", "Quality, pricing power, luxury", "Discretionary, credit-dependent"],
                &["Fixed Income", "High-quality duration", "Consumer credit, high yield"],
                &["Real Assets", "Rental housing, infrastructure", "Speculative development"],
                &["Cash", "Elevated (opportunity fund)", "Minimum allocation"],
                &["Geography", "Selective international", "Maximum U.S. concentration"],
            ],
        )),
        text(TextBlock::callout(
            Tone::Success,
            "**THE OVERARCHING PRINCIPLE**

            When official data and lived experience diverge this sharply, prudent investors \
            should not assume either is definitively correct. The appropriate response is to \
            position for multiple scenarios, maintain flexibility, and avoid maximum exposure to \
            any single narrative.",
        )),
        text(TextBlock::Divider),
        text(TextBlock::caption(
            "**DISCLAIMER:** This analysis is for informational purposes only and does not \
            constitute investment advice. All investments carry risk, including potential loss \
            of principal. Investors should consult qualified financial advisors before making \
            investment decisions.",
        )),
    ]
}
